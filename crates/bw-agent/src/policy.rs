//! Archetype policies.
//!
//! Every agent runs the same [`PhaseController`](crate::PhaseController).
//! What makes an agent colour-blind, deceptive, lazy or strong is the
//! [`PolicyBundle`] it is built with:
//!
//! | Seam                     | Consulted                                  |
//! |--------------------------|--------------------------------------------|
//! | [`PerceptionFilter`]     | once per tick, on the incoming world view  |
//! | [`OutboundMessagePolicy`]| once per outgoing message, before encoding |
//! | [`ActionAbortPolicy`]    | once per tick, on the active phase         |
//! | [`CarryCapacity`]        | by the task selector                       |
//!
//! # Thread safety
//!
//! All policy traits require `Send` so a controller can be stepped on a
//! worker thread.

use bw_core::{AgentRng, Location, Visualization};
use bw_protocol::Message;
use serde::{Deserialize, Serialize};

use crate::{Phase, WorldView};

// ── Traits ────────────────────────────────────────────────────────────────────

/// Rewrites the world view before the controller sees it.
pub trait PerceptionFilter: Send {
    fn filter(&self, view: &mut WorldView);

    /// Whether goal descriptors learned at start-up lose their colour.
    fn strips_colour(&self) -> bool {
        false
    }
}

/// What the outbound policy may draw on when rewriting a message.
#[derive(Debug, Clone, Copy)]
pub struct OutboundContext<'a> {
    /// Rooms the agent knows of.
    pub rooms: &'a [String],
    /// Goal descriptors in key order.
    pub goals: &'a [Visualization],
}

/// Last chance to change a message before it is encoded and broadcast.
pub trait OutboundMessagePolicy: Send {
    fn rewrite(&mut self, message: Message, ctx: &OutboundContext<'_>, rng: &mut AgentRng) -> Message;
}

/// Decides, once per tick, whether to abandon the active phase.
pub trait ActionAbortPolicy: Send {
    fn should_abort(&mut self, phase: Phase, rng: &mut AgentRng) -> bool;

    /// The controller changed phase; forget any per-phase decision.
    fn reset(&mut self) {}
}

/// How many blocks the agent may hold at once.
pub trait CarryCapacity: Send {
    fn max_blocks(&self) -> usize;
}

// ── Careful defaults ──────────────────────────────────────────────────────────

/// Sees everything as it is.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullPerception;

impl PerceptionFilter for FullPerception {
    fn filter(&self, _view: &mut WorldView) {}
}

/// Sends every message unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Truthful;

impl OutboundMessagePolicy for Truthful {
    fn rewrite(&mut self, message: Message, _ctx: &OutboundContext<'_>, _rng: &mut AgentRng) -> Message {
        message
    }
}

/// Never abandons a phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct Committed;

impl ActionAbortPolicy for Committed {
    fn should_abort(&mut self, _phase: Phase, _rng: &mut AgentRng) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedCapacity(pub usize);

impl CarryCapacity for FixedCapacity {
    fn max_blocks(&self) -> usize {
        self.0
    }
}

// ── Colour blindness ──────────────────────────────────────────────────────────

/// Removes the colour channel from every perceived object.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColourBlind;

impl PerceptionFilter for ColourBlind {
    fn filter(&self, view: &mut WorldView) {
        for obj in &mut view.objects {
            if let Some(vis) = obj.visualization.as_mut() {
                vis.colour = None;
            }
        }
    }

    fn strips_colour(&self) -> bool {
        true
    }
}

// ── Deception ─────────────────────────────────────────────────────────────────

/// Falsifies outgoing messages with probability `probability`.
///
/// Room names are swapped for another known room, locations are shifted by
/// up to `max_shift` tiles per axis and block descriptors are swapped for
/// another goal block's.  `GoalBlocks` and `Reputation` always pass.
#[derive(Debug, Clone, Copy)]
pub struct Liar {
    pub probability: f64,
    pub max_shift: i32,
}

impl Default for Liar {
    fn default() -> Self {
        Self { probability: 0.8, max_shift: 3 }
    }
}

impl Liar {
    fn other_room(&self, room: String, ctx: &OutboundContext<'_>, rng: &mut AgentRng) -> String {
        let others: Vec<&String> = ctx.rooms.iter().filter(|r| **r != room).collect();
        match rng.choose(&others) {
            Some(r) => (*r).clone(),
            None => room,
        }
    }

    fn shifted(&self, loc: Location, rng: &mut AgentRng) -> Location {
        let m = self.max_shift.max(1);
        loop {
            let (dx, dy) = (rng.gen_range(-m..=m), rng.gen_range(-m..=m));
            if (dx, dy) != (0, 0) {
                return loc.offset(dx, dy);
            }
        }
    }

    fn other_block(&self, vis: Visualization, ctx: &OutboundContext<'_>, rng: &mut AgentRng) -> Visualization {
        let others: Vec<&Visualization> = ctx.goals.iter().filter(|g| !g.matches(&vis)).collect();
        match rng.choose(&others) {
            Some(v) => (*v).clone(),
            None => vis,
        }
    }
}

impl OutboundMessagePolicy for Liar {
    fn rewrite(&mut self, message: Message, ctx: &OutboundContext<'_>, rng: &mut AgentRng) -> Message {
        if matches!(message, Message::GoalBlocks { .. } | Message::Reputation { .. }) {
            return message;
        }
        if !rng.gen_bool(self.probability) {
            return message;
        }
        match message {
            Message::MoveToRoom { room }    => Message::MoveToRoom { room: self.other_room(room, ctx, rng) },
            Message::OpenDoor { room }      => Message::OpenDoor { room: self.other_room(room, ctx, rng) },
            Message::SearchingRoom { room } => Message::SearchingRoom { room: self.other_room(room, ctx, rng) },
            Message::FoundBlock { visualization, location } => Message::FoundBlock {
                visualization,
                location: self.shifted(location, rng),
            },
            Message::FoundGoalBlock { visualization, location } => Message::FoundGoalBlock {
                visualization: self.other_block(visualization, ctx, rng),
                location: self.shifted(location, rng),
            },
            Message::PickUpBlock { visualization, location } => Message::PickUpBlock {
                visualization: self.other_block(visualization, ctx, rng),
                location: self.shifted(location, rng),
            },
            Message::DropBlock { visualization, location } => Message::DropBlock {
                visualization: self.other_block(visualization, ctx, rng),
                location: self.shifted(location, rng),
            },
            Message::HelpCarry { visualization, location } => Message::HelpCarry {
                visualization: self.other_block(visualization, ctx, rng),
                location: self.shifted(location, rng),
            },
            Message::CanHelp { location } => Message::CanHelp { location: self.shifted(location, rng) },
            other => other,
        }
    }
}

// ── Laziness ──────────────────────────────────────────────────────────────────

/// Abandons abortable phases at random.
///
/// On entering an abortable phase the agent commits to it with probability
/// `commit_probability`.  While uncommitted it abandons an approach with
/// `approach_abort` per tick and a sweep with `sweep_abort`.
#[derive(Debug, Clone)]
pub struct LazyAbort {
    pub commit_probability: f64,
    pub approach_abort: f64,
    pub sweep_abort: f64,
    /// Commit decision for the active phase, drawn on its first check.
    committed: Option<bool>,
}

impl Default for LazyAbort {
    fn default() -> Self {
        Self::new(0.5, 0.3, 0.6)
    }
}

impl LazyAbort {
    pub fn new(commit_probability: f64, approach_abort: f64, sweep_abort: f64) -> Self {
        Self { commit_probability, approach_abort, sweep_abort, committed: None }
    }
}

impl ActionAbortPolicy for LazyAbort {
    fn should_abort(&mut self, phase: Phase, rng: &mut AgentRng) -> bool {
        if !phase.is_abortable() {
            return false;
        }
        let committed = *self
            .committed
            .get_or_insert_with(|| rng.gen_bool(self.commit_probability));
        if committed {
            return false;
        }
        let p = if phase == Phase::SweepRoom { self.sweep_abort } else { self.approach_abort };
        rng.gen_bool(p)
    }

    fn reset(&mut self) {
        self.committed = None;
    }
}

// ── Bundles ───────────────────────────────────────────────────────────────────

/// The four seams one controller is built with.
pub struct PolicyBundle {
    pub perception: Box<dyn PerceptionFilter>,
    pub outbound: Box<dyn OutboundMessagePolicy>,
    pub abort: Box<dyn ActionAbortPolicy>,
    pub capacity: Box<dyn CarryCapacity>,
}

impl Default for PolicyBundle {
    fn default() -> Self {
        Archetype::Careful.policies()
    }
}

impl std::fmt::Debug for PolicyBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyBundle")
            .field("strips_colour", &self.perception.strips_colour())
            .field("capacity", &self.capacity.max_blocks())
            .finish_non_exhaustive()
    }
}

/// The agent types of the team, each a preset [`PolicyBundle`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    #[default]
    Careful,
    ColourBlind,
    Liar,
    Lazy,
    Strong,
}

impl Archetype {
    pub fn policies(self) -> PolicyBundle {
        let mut bundle = PolicyBundle {
            perception: Box::new(FullPerception),
            outbound: Box::new(Truthful),
            abort: Box::new(Committed),
            capacity: Box::new(FixedCapacity(1)),
        };
        match self {
            Archetype::Careful     => {}
            Archetype::ColourBlind => bundle.perception = Box::new(ColourBlind),
            Archetype::Liar        => bundle.outbound = Box::new(Liar::default()),
            Archetype::Lazy        => bundle.abort = Box::new(LazyAbort::default()),
            Archetype::Strong      => bundle.capacity = Box::new(FixedCapacity(2)),
        }
        bundle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Careful     => "careful",
            Archetype::ColourBlind => "colour_blind",
            Archetype::Liar        => "liar",
            Archetype::Lazy        => "lazy",
            Archetype::Strong      => "strong",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
