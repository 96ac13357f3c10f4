//! `PhaseController`: one agent's per-tick step function.
//!
//! # Tick order
//!
//! 1. Filter the world view through the perception policy.
//! 2. On the first tick with a drop zone in view: build the belief store,
//!    register teammates, broadcast `GoalBlocks` and `Reputation`.  Messages
//!    received before that are held and processed with this tick's inbox.
//! 3. Perceive: record goal-block sightings, queue `FoundGoalBlock` /
//!    `FoundBlock`.
//! 4. Decode the inbox (undecodable messages are dropped), score everything
//!    with the trust engine, then apply accepted messages to the belief store.
//! 5. Ask the abort policy about the active phase.
//! 6. Walk phases until one yields a physical action, the machine goes idle
//!    or `max_transitions_per_tick` is spent.
//! 7. Run queued messages through the outbound policy, encode, de-duplicate
//!    block reports.
//!
//! At most one [`Action`] leaves a tick.

use std::collections::BTreeSet;

use bw_belief::{BeliefStore, BeliefStoreBuilder, DoorFilter, GoalBlock};
use bw_core::{AgentName, AgentRng, BlockKey, Location, ObjectId, Tick, Visualization};
use bw_protocol::{Envelope, GoalBlockReport, Message, MessageKind, Received, Transport, encode};
use bw_trust::{MemoryStore, ReputationStore, TrustEngine};

use crate::{
    Action, AgentConfig, AgentResult, Archetype, FetchPlan, Navigator, OutboundContext, Phase,
    PolicyBundle, TaskSelector, WaypointNavigator, WorldObject, WorldView,
};

/// Messages held before start-up; older ones are dropped beyond this.
const EARLY_INBOX_LIMIT: usize = 1024;

/// What one tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutput {
    pub action: Option<Action>,
    /// Encoded messages to broadcast.
    pub messages: Vec<Envelope>,
}

/// The door the agent is heading for or sweeping behind.
#[derive(Clone, Debug)]
struct DoorTarget {
    id: ObjectId,
    room: String,
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`PhaseController`].
///
/// ```
/// use bw_agent::{Archetype, ControllerBuilder};
///
/// let controller = ControllerBuilder::new("alice")
///     .archetype(Archetype::Strong)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(controller.capacity(), 2);
/// ```
pub struct ControllerBuilder {
    name: AgentName,
    archetype: Archetype,
    policies: Option<PolicyBundle>,
    config: AgentConfig,
    store: Option<Box<dyn ReputationStore>>,
    navigator: Option<Box<dyn Navigator>>,
    seed: u64,
}

impl ControllerBuilder {
    pub fn new(name: impl Into<AgentName>) -> Self {
        Self {
            name: name.into(),
            archetype: Archetype::default(),
            policies: None,
            config: AgentConfig::default(),
            store: None,
            navigator: None,
            seed: 0,
        }
    }

    pub fn archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = archetype;
        self
    }

    /// Custom policies; overrides [`archetype`](Self::archetype).
    pub fn policies(mut self, policies: PolicyBundle) -> Self {
        self.policies = Some(policies);
        self
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Reputation ledger backend.  Defaults to a fresh [`MemoryStore`].
    pub fn store(mut self, store: impl ReputationStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Defaults to [`WaypointNavigator`].
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }

    /// Global run seed; the agent's RNG stream is derived from it and the name.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> AgentResult<PhaseController> {
        self.config.validate()?;
        let store = self.store.unwrap_or_else(|| Box::new(MemoryStore::new()));
        let trust = TrustEngine::load(self.name.clone(), store, self.config.trust.clone())?;
        let policies = self.policies.unwrap_or_else(|| self.archetype.policies());
        Ok(PhaseController {
            rng: AgentRng::for_name(self.seed, &self.name),
            selector: TaskSelector::new(policies.capacity.max_blocks()),
            navigator: self.navigator.unwrap_or_else(|| Box::new(WaypointNavigator::new())),
            name: self.name,
            archetype: self.archetype,
            config: self.config,
            policies,
            trust,
            belief: None,
            phase: None,
            previous_phase: None,
            door: None,
            target: None,
            forced_drops: Vec::new(),
            reported: BTreeSet::new(),
            pending: Vec::new(),
            early: Vec::new(),
            rooms: Vec::new(),
        })
    }
}

// ── PhaseController ───────────────────────────────────────────────────────────

pub struct PhaseController {
    name: AgentName,
    archetype: Archetype,
    config: AgentConfig,
    policies: PolicyBundle,
    selector: TaskSelector,
    navigator: Box<dyn Navigator>,
    trust: TrustEngine,
    rng: AgentRng,
    /// `None` until the drop zone has been seen.
    belief: Option<BeliefStore>,
    phase: Option<Phase>,
    previous_phase: Option<Phase>,
    door: Option<DoorTarget>,
    target: Option<FetchPlan>,
    /// Carried blocks a teammate already delivered; released before anything else.
    forced_drops: Vec<BlockKey>,
    /// Encoded block reports already sent or received.
    reported: BTreeSet<String>,
    pending: Vec<Message>,
    /// Inbox held back while no drop zone has been seen, oldest first.
    early: Vec<Envelope>,
    rooms: Vec<String>,
}

impl PhaseController {
    pub fn builder(name: impl Into<AgentName>) -> ControllerBuilder {
        ControllerBuilder::new(name)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &AgentName {
        &self.name
    }

    /// Preset the controller was built from (custom bundles report the default).
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn previous_phase(&self) -> Option<Phase> {
        self.previous_phase
    }

    pub fn capacity(&self) -> usize {
        self.selector.capacity()
    }

    /// Belief store, once initialised.
    pub fn belief(&self) -> Option<&BeliefStore> {
        self.belief.as_ref()
    }

    pub fn trust(&self) -> &TrustEngine {
        &self.trust
    }

    /// Write the reputation ledger now.
    pub fn persist(&mut self) -> AgentResult<()> {
        Ok(self.trust.persist()?)
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Drain `transport`, step once, broadcast the results.
    pub fn tick<T>(&mut self, view: &WorldView, transport: &mut T) -> Option<Action>
    where
        T: Transport + ?Sized,
    {
        let inbox = transport.drain_inbox();
        let out = self.step(view, inbox);
        for envelope in out.messages {
            transport.broadcast(envelope);
        }
        out.action
    }

    /// One tick: everything received since the last one in, at most one
    /// action and any number of encoded messages out.
    pub fn step(&mut self, view: &WorldView, inbox: Vec<Envelope>) -> StepOutput {
        let mut view = view.clone();
        self.policies.perception.filter(&mut view);
        self.rooms = view.room_names();

        let mut belief = match self.belief.take() {
            Some(belief) => belief,
            None => match self.initialize(&view) {
                Some(belief) => belief,
                None => {
                    self.hold_early(inbox, view.tick);
                    return StepOutput::default();
                }
            },
        };
        let inbox = if self.early.is_empty() {
            inbox
        } else {
            let mut held = std::mem::take(&mut self.early);
            held.extend(inbox);
            held
        };

        self.reconcile_carrying(&view, &mut belief);
        self.perceive(&view, &mut belief);

        let received = self.receive(inbox);
        self.trust.update(&received, view.tick);
        for rx in &received {
            if self.trust.accept(rx) {
                self.apply(rx, &mut belief);
            }
        }

        let action = self.decide(&view, &mut belief);
        let messages = self.flush_outbox(&belief);
        self.belief = Some(belief);
        StepOutput { action, messages }
    }

    fn hold_early(&mut self, inbox: Vec<Envelope>, tick: Tick) {
        self.early.extend(inbox);
        let overflow = self.early.len().saturating_sub(EARLY_INBOX_LIMIT);
        self.early.drain(..overflow);
        tracing::debug!(
            agent = %self.name,
            tick = %tick,
            held = self.early.len(),
            dropped = overflow,
            "no drop zone in view, postponing start-up"
        );
    }

    fn initialize(&mut self, view: &WorldView) -> Option<BeliefStore> {
        let builder = view
            .drop_zone()
            .into_iter()
            .filter_map(|m| Some((m.visualization.clone()?, m.location)))
            .fold(
                BeliefStoreBuilder::new().colour_blind(self.policies.perception.strips_colour()),
                |b, (vis, drop_off)| b.goal_block(vis, drop_off),
            );
        let belief = match builder.build() {
            Ok(belief) => belief,
            Err(err) => {
                tracing::debug!(agent = %self.name, error = %err, "cannot build belief store yet");
                return None;
            }
        };

        self.trust.register_teammates(view.teammates());
        self.trust.set_goal_info(
            belief
                .goal_blocks()
                .iter()
                .map(|gb| (gb.visualization().clone(), gb.drop_off())),
        );
        self.pending.push(Message::GoalBlocks {
            blocks: belief
                .goal_blocks()
                .iter()
                .map(|gb| GoalBlockReport { visualization: gb.visualization().clone(), drop_off: gb.drop_off() })
                .collect(),
        });
        self.pending.push(Message::Reputation { ledger: self.trust.reputation_snapshot() });
        tracing::info!(
            agent = %self.name,
            archetype = %self.archetype,
            goal_blocks = belief.goal_blocks().len(),
            "agent started"
        );
        Some(belief)
    }

    /// Drop believed-carried blocks the world says are not in hand.
    fn reconcile_carrying(&mut self, view: &WorldView, belief: &mut BeliefStore) {
        let Some(held) = view.carrying.as_ref() else { return };
        let lost: Vec<BlockKey> = belief
            .carrying()
            .iter()
            .filter(|(_, id)| !held.contains(id))
            .map(|(key, _)| *key)
            .collect();
        for key in lost {
            belief.release(key);
            if !self.forced_drops.contains(&key) {
                belief.reopen(key);
            }
            self.forced_drops.retain(|k| *k != key);
            tracing::debug!(agent = %self.name, block = %key, "block not in hand, reopening");
        }
    }

    fn perceive(&mut self, view: &WorldView, belief: &mut BeliefStore) {
        for obj in view.collectable_blocks() {
            let Some(vis) = obj.visualization.as_ref() else { continue };
            if belief.is_drop_off(obj.location) {
                continue;
            }
            if !belief.matches_any(vis) {
                self.pending.push(Message::FoundBlock { visualization: vis.clone(), location: obj.location });
                continue;
            }
            for key in belief.record_sighting(vis, obj.location, Some(obj.id.clone())) {
                let Some(goal) = belief.goal_block(key) else { continue };
                let goal_vis = goal.visualization().clone();
                self.trust.note_sighting(&goal_vis, obj.location, view.tick);
                self.pending.push(Message::FoundGoalBlock { visualization: goal_vis, location: obj.location });
            }
        }
    }

    fn receive(&mut self, inbox: Vec<Envelope>) -> Vec<Received> {
        let mut received = Vec::with_capacity(inbox.len());
        for envelope in inbox {
            if envelope.sender == self.name {
                continue;
            }
            match envelope.open() {
                Ok(rx) => {
                    if is_block_report(rx.message.kind()) {
                        self.reported.insert(envelope.content);
                    }
                    received.push(rx);
                }
                Err(err) => tracing::debug!(
                    agent = %self.name,
                    sender = %envelope.sender,
                    content = %envelope.content,
                    error = %err,
                    "dropping undecodable message"
                ),
            }
        }
        received
    }

    /// Belief effects of an accepted message.
    fn apply(&mut self, rx: &Received, belief: &mut BeliefStore) {
        match &rx.message {
            Message::FoundGoalBlock { visualization, location }
            | Message::HelpCarry { visualization, location } => {
                belief.record_sighting(visualization, *location, None);
            }
            Message::MoveToRoom { room }
            | Message::OpenDoor { room }
            | Message::SearchingRoom { room } => belief.visit_reported(room),
            Message::PickUpBlock { visualization, location } => {
                belief.remove_candidates_at(visualization, *location);
            }
            Message::DropBlock { visualization, location } => {
                self.apply_drop(visualization, *location, belief);
            }
            Message::FoundBlock { .. }
            | Message::GoalBlocks { .. }
            | Message::Reputation { .. }
            | Message::CanHelp { .. } => {}
        }
    }

    fn apply_drop(&mut self, vis: &Visualization, location: Location, belief: &mut BeliefStore) {
        let delivered = belief
            .drop_off_at(location)
            .filter(|key| belief.goal_block(*key).is_some_and(|gb| gb.visualization().matches(vis)));
        let Some(key) = delivered else {
            // Dropped somewhere else: the block lies there now.
            belief.record_sighting(vis, location, None);
            return;
        };
        belief.mark_delivered(key);
        if belief.is_carrying(key) && !self.forced_drops.contains(&key) {
            tracing::debug!(agent = %self.name, block = %key, "teammate delivered a block we carry");
            self.forced_drops.push(key);
            self.navigator.reset();
            self.target = None;
            self.set_phase(Some(Phase::Drop));
        }
    }

    // ── Phase machine ─────────────────────────────────────────────────────

    fn decide(&mut self, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        if let Some(phase) = self.phase {
            if self.policies.abort.should_abort(phase, &mut self.rng) {
                if let Some(action) = self.abandon(phase, view, belief) {
                    return Some(action);
                }
            }
        }

        for _ in 0..self.config.max_transitions_per_tick {
            if self.phase.is_none() {
                let selection = self.selector.select_phase(view, belief)?;
                if let Some(filter) = selection.door_filter {
                    belief.set_door_filter(filter);
                }
                self.set_phase(Some(selection.phase));
            }
            let phase = self.phase?;
            if let Some(action) = self.run_phase(phase, view, belief) {
                return Some(action);
            }
        }
        tracing::debug!(agent = %self.name, phase = ?self.phase, "transition budget spent");
        None
    }

    fn run_phase(&mut self, phase: Phase, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        match phase {
            Phase::SelectClosedDoor    => self.select_door(false, view, belief),
            Phase::ApproachDoor        => self.approach(view, Phase::OpenDoor),
            Phase::OpenDoor            => self.open_door(),
            Phase::SelectOpenDoor      => self.select_door(true, view, belief),
            Phase::ApproachOpenDoor    => self.approach(view, Phase::PlanRoomSweep),
            Phase::PlanRoomSweep       => self.plan_room_sweep(view, belief),
            Phase::SweepRoom           => self.sweep_room(view, belief),
            Phase::PlanApproachBlock   => self.plan_approach_block(view, belief),
            Phase::ApproachBlock       => self.approach(view, Phase::Grab),
            Phase::Grab                => self.grab(view, belief),
            Phase::PlanApproachDropOff => self.plan_approach_drop_off(belief),
            Phase::ApproachDropOff     => self.approach(view, Phase::Drop),
            Phase::Drop                => self.drop(view, belief),
        }
    }

    fn set_phase(&mut self, next: Option<Phase>) {
        if next == self.phase {
            return;
        }
        tracing::debug!(agent = %self.name, from = ?self.phase, to = ?next, "phase transition");
        self.previous_phase = self.phase;
        self.phase = next;
        self.policies.abort.reset();
    }

    /// Give up on `phase`.  Abandoning the way to a drop-off puts the block
    /// down where the agent stands.
    fn abandon(&mut self, phase: Phase, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        tracing::debug!(agent = %self.name, phase = ?phase, "abandoning phase");
        self.navigator.reset();
        self.target = None;
        self.set_phase(None);
        if phase != Phase::ApproachDropOff {
            return None;
        }

        let (key, id) = belief.next_delivery().map(|(k, id)| (k, id.clone()))?;
        let here = view.agent_location;
        belief.release(key);
        belief.reopen(key);
        if let Err(err) = belief.record_candidate(key, here, Some(id.clone())) {
            tracing::debug!(agent = %self.name, error = %err, "cannot record abandoned block");
        }
        let vis = belief.goal_block(key)?.visualization().clone();
        self.pending.push(Message::DropBlock { visualization: vis, location: here });
        Some(Action::Drop(id))
    }

    fn select_door(&mut self, open: bool, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        let filter = belief.door_filter();
        let doors: Vec<&WorldObject> = view
            .doors()
            .filter(|d| d.is_open == open && belief.admits(filter, d.room()))
            .collect();

        let Some(idx) = view.agent_location.closest(doors.iter().map(|d| d.location)) else {
            if open {
                self.set_phase(None);
            } else {
                belief.set_door_filter(DoorFilter::UnvisitedBySelf);
                self.set_phase(Some(Phase::SelectOpenDoor));
            }
            return None;
        };

        let door = doors[idx];
        let room = door.room().to_owned();
        let (dx, dy) = self.config.door_approach_offset;
        let front = door.location.offset(dx, dy);
        if let Err(err) = self.navigator.plan_route(&[front]) {
            tracing::warn!(agent = %self.name, room = %room, error = %err, "door unreachable, skipping room");
            belief.visit_self(&room);
            self.set_phase(None);
            return None;
        }

        self.door = Some(DoorTarget { id: door.id.clone(), room: room.clone() });
        self.pending.push(Message::MoveToRoom { room });
        self.set_phase(Some(if open { Phase::ApproachOpenDoor } else { Phase::ApproachDoor }));
        None
    }

    fn approach(&mut self, view: &WorldView, next: Phase) -> Option<Action> {
        match self.navigator.step(view) {
            Some(action) => {
                tracing::trace!(agent = %self.name, phase = ?self.phase, action = %action, "navigating");
                Some(action)
            }
            None => {
                self.set_phase(Some(next));
                None
            }
        }
    }

    fn open_door(&mut self) -> Option<Action> {
        let Some(door) = self.door.clone() else {
            self.set_phase(None);
            return None;
        };
        self.pending.push(Message::OpenDoor { room: door.room });
        self.set_phase(Some(Phase::PlanRoomSweep));
        Some(Action::OpenDoor(door.id))
    }

    fn plan_room_sweep(&mut self, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        let here = view.agent_location;
        let tour: Vec<Location> = self
            .config
            .sweep_offsets
            .iter()
            .map(|&(dx, dy)| here.offset(dx, dy))
            .collect();
        let room = self.door.as_ref().map(|d| d.room.clone());
        if let Err(err) = self.navigator.plan_route(&tour) {
            tracing::warn!(agent = %self.name, room = ?room, error = %err, "room interior unreachable");
            if let Some(room) = room {
                belief.visit_self(&room);
            }
            self.set_phase(None);
            return None;
        }
        if let Some(room) = room {
            self.pending.push(Message::SearchingRoom { room });
        }
        self.set_phase(Some(Phase::SweepRoom));
        None
    }

    fn sweep_room(&mut self, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        if let Some(action) = self.navigator.step(view) {
            tracing::trace!(agent = %self.name, action = %action, "sweeping");
            return Some(action);
        }
        if let Some(door) = self.door.take() {
            belief.visit_self(&door.room);
        }
        self.set_phase(None);
        None
    }

    fn plan_approach_block(&mut self, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        let Some(plan) = self.selector.plan_fetch(view.agent_location, belief) else {
            self.set_phase(None);
            return None;
        };
        if let Err(err) = self.navigator.plan_route(&[plan.location]) {
            tracing::warn!(
                agent = %self.name,
                block = %plan.key,
                location = %plan.location,
                error = %err,
                "block unreachable"
            );
            self.forget_candidate(belief, plan.key, plan.location);
            self.set_phase(None);
            return None;
        }
        tracing::debug!(
            agent = %self.name,
            block = %plan.key,
            location = %plan.location,
            cost = plan.cost,
            "fetch planned"
        );
        self.target = Some(plan);
        self.set_phase(Some(Phase::ApproachBlock));
        None
    }

    fn grab(&mut self, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        self.set_phase(None);
        let plan = self.target.take()?;
        let goal_vis = belief.goal_block(plan.key)?.visualization().clone();
        let here = view.agent_location;

        let found = match &plan.id {
            Some(id) => view.blocks_at(here).find(|o| &o.id == id),
            None => view
                .blocks_at(here)
                .find(|o| o.visualization.as_ref().is_some_and(|v| goal_vis.matches(v))),
        };
        let Some(block) = found else {
            self.forget_candidate(belief, plan.key, plan.location);
            return None;
        };

        let id = block.id.clone();
        if let Some(vis) = &block.visualization {
            belief.remove_candidates_at(vis, plan.location);
        }
        belief.mark_carrying(plan.key, id.clone());
        tracing::debug!(agent = %self.name, block = %plan.key, id = %id, "picked up goal block");
        self.pending.push(Message::PickUpBlock { visualization: goal_vis, location: here });
        Some(Action::Grab(id))
    }

    fn plan_approach_drop_off(&mut self, belief: &mut BeliefStore) -> Option<Action> {
        let drop_off = belief
            .next_delivery()
            .and_then(|(key, _)| belief.goal_block(key))
            .map(GoalBlock::drop_off);
        let Some(drop_off) = drop_off else {
            self.set_phase(None);
            return None;
        };
        if let Err(err) = self.navigator.plan_route(&[drop_off]) {
            tracing::warn!(agent = %self.name, location = %drop_off, error = %err, "drop-off unreachable");
            self.set_phase(None);
            return None;
        }
        self.set_phase(Some(Phase::ApproachDropOff));
        None
    }

    fn drop(&mut self, view: &WorldView, belief: &mut BeliefStore) -> Option<Action> {
        let here = view.agent_location;

        if let Some(key) = self.forced_drops.pop() {
            if self.forced_drops.is_empty() {
                self.set_phase(None);
            }
            let id = belief.release(key)?;
            let vis = belief.goal_block(key)?.visualization().clone();
            tracing::debug!(agent = %self.name, block = %key, "releasing block a teammate delivered");
            self.pending.push(Message::DropBlock { visualization: vis, location: here });
            return Some(Action::Drop(id));
        }

        self.set_phase(None);
        let (key, id) = belief.next_delivery().map(|(k, id)| (k, id.clone()))?;
        belief.release(key);
        let goal = belief.goal_block(key)?;
        let (vis, drop_off) = (goal.visualization().clone(), goal.drop_off());
        if here == drop_off {
            tracing::info!(agent = %self.name, block = %key, location = %here, "delivered goal block");
        } else {
            belief.reopen(key);
            if let Err(err) = belief.record_candidate(key, here, Some(id.clone())) {
                tracing::debug!(agent = %self.name, error = %err, "cannot record dropped block");
            }
            tracing::debug!(agent = %self.name, block = %key, location = %here, "dropped away from drop-off");
        }
        self.pending.push(Message::DropBlock { visualization: vis, location: here });
        Some(Action::Drop(id))
    }

    /// Stale-belief correction: the block is not where we thought.
    fn forget_candidate(&self, belief: &mut BeliefStore, key: BlockKey, location: Location) {
        match belief.remove_candidate(key, location) {
            Ok(removed) => tracing::debug!(
                agent = %self.name,
                block = %key,
                location = %location,
                removed,
                "stale candidate removed"
            ),
            Err(err) => tracing::debug!(agent = %self.name, error = %err, "cannot remove candidate"),
        }
    }

    // ── Outbound ──────────────────────────────────────────────────────────

    fn flush_outbox(&mut self, belief: &BeliefStore) -> Vec<Envelope> {
        let goals: Vec<Visualization> = belief
            .goal_blocks()
            .iter()
            .map(|gb| gb.visualization().clone())
            .collect();
        let mut out = Vec::new();
        for message in std::mem::take(&mut self.pending) {
            if is_block_report(message.kind()) {
                match encode(&message) {
                    Ok(content) => {
                        if !self.reported.insert(content) {
                            continue;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(agent = %self.name, error = %err, "failed to encode block report");
                        continue;
                    }
                }
            }
            let ctx = OutboundContext { rooms: &self.rooms, goals: &goals };
            let message = self.policies.outbound.rewrite(message, &ctx, &mut self.rng);
            match encode(&message) {
                Ok(content) => out.push(Envelope::new(self.name.clone(), content)),
                Err(err) => tracing::warn!(
                    agent = %self.name,
                    kind = %message.kind(),
                    error = %err,
                    "failed to encode message"
                ),
            }
        }
        out
    }
}

impl std::fmt::Debug for PhaseController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseController")
            .field("name", &self.name)
            .field("archetype", &self.archetype)
            .field("phase", &self.phase)
            .field("carrying", &self.belief.as_ref().map(BeliefStore::carrying_count))
            .finish_non_exhaustive()
    }
}

fn is_block_report(kind: MessageKind) -> bool {
    matches!(kind, MessageKind::FoundGoalBlock | MessageKind::FoundBlock)
}
