//! `TrustEngine`: per-agent reputation bookkeeping.
//!
//! # Tick protocol
//!
//! The owning controller calls, once per tick and in this order:
//!
//! 1. [`TrustEngine::update`] with every message decoded this tick, which
//!    scores each one against the sender's history and persists the ledger.
//! 2. [`TrustEngine::accept`] per message, with the freshly updated scores,
//!    to decide which ones reach the belief store.

use std::collections::{BTreeMap, VecDeque};

use bw_core::{AgentName, Ledger, Location, Tick, TrustRecord, Visualization};
use bw_protocol::{GoalBlockReport, Message, Received};

use crate::{ReputationStore, TrustConfig, TrustResult};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Channel {
    Reliability,
    Competence,
}

/// A goal block seen at a location, by a teammate or by the owner.
#[derive(Clone, Debug)]
struct Sighting {
    reporter: AgentName,
    visualization: Visualization,
    location: Location,
    tick: Tick,
}

/// Outcome of checking a `DropBlock` claim.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum DropVerdict {
    Consistent,
    NotAGoalBlock,
    NotAtDropOff,
    NeverPickedUp,
}

pub struct TrustEngine {
    owner: AgentName,
    config: TrustConfig,
    ledger: Ledger,
    store: Box<dyn ReputationStore>,
    goals: Vec<Visualization>,
    drop_offs: Vec<Location>,
    /// Previous message of each sender, with its arrival tick.
    last: BTreeMap<AgentName, (Message, Tick)>,
    /// Goal blocks each sender announced picking up and has not yet
    /// delivered, oldest first, at most one per goal block.
    pick_ups: BTreeMap<AgentName, Vec<Visualization>>,
    /// Oldest first, at most `config.sighting_memory` long.
    sightings: VecDeque<Sighting>,
    /// Unsaved changes.  A failed save leaves this set, so the next update retries.
    dirty: bool,
}

impl TrustEngine {
    /// Load `owner`'s ledger from `store`, or start empty.
    pub fn load(
        owner: AgentName,
        store: Box<dyn ReputationStore>,
        config: TrustConfig,
    ) -> TrustResult<Self> {
        config.validate()?;
        let ledger = store.load(&owner)?;
        match &ledger {
            Some(l) => tracing::info!(agent = %owner, teammates = l.len(), "loaded reputation ledger"),
            None => tracing::info!(agent = %owner, "no reputation ledger, starting from prior"),
        }
        Ok(Self {
            owner,
            config,
            ledger: ledger.unwrap_or_default(),
            store,
            goals: Vec::new(),
            drop_offs: Vec::new(),
            last: BTreeMap::new(),
            pick_ups: BTreeMap::new(),
            sightings: VecDeque::new(),
            dirty: false,
        })
    }

    pub fn owner(&self) -> &AgentName {
        &self.owner
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Give every teammate missing from the ledger the prior, then write the
    /// completed ledger back once.
    pub fn register_teammates<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'a AgentName>,
    {
        for name in names {
            if *name != self.owner {
                self.ledger.entry_or(name, self.config.prior);
            }
        }
        self.dirty = true;
        self.flush();
    }

    /// Goal descriptors and drop-off tiles that claims are checked against.
    pub fn set_goal_info<I>(&mut self, goals: I)
    where
        I: IntoIterator<Item = (Visualization, Location)>,
    {
        let (goals, drop_offs): (Vec<_>, Vec<_>) = goals.into_iter().unzip();
        self.goals = goals;
        self.drop_offs = drop_offs;
    }

    /// Remember the owner's own goal-block sighting as corroboration.
    pub fn note_sighting(&mut self, visualization: &Visualization, location: Location, tick: Tick) {
        let owner = self.owner.clone();
        self.remember_sighting(owner, visualization, location, tick);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Copy of the ledger for gossiping.
    pub fn reputation_snapshot(&self) -> Ledger {
        self.ledger.clone()
    }

    pub fn record(&self, name: &AgentName) -> TrustRecord {
        self.ledger.get(name.as_str()).copied().unwrap_or(self.config.prior)
    }

    pub fn is_reliable(&self, name: &AgentName) -> bool {
        self.record(name).reliability.ratio() >= self.config.reliability_threshold
    }

    pub fn is_competent(&self, name: &AgentName) -> bool {
        self.record(name).competence.ratio() >= self.config.competence_threshold
    }

    /// Whether `received` should reach the belief store.
    ///
    /// Every kind needs a reliable sender; capability claims also need a
    /// competent one.
    pub fn accept(&self, received: &Received) -> bool {
        let sender = &received.sender;
        let ok = self.is_reliable(sender)
            && (!received.message.kind().asserts_capability() || self.is_competent(sender));
        if !ok {
            tracing::debug!(
                agent = %self.owner,
                sender = %sender,
                kind = %received.message.kind(),
                "rejected message from untrusted sender"
            );
        }
        ok
    }

    // ── Update ────────────────────────────────────────────────────────────

    /// Score every message of this tick, in arrival order, then persist.
    pub fn update(&mut self, messages: &[Received], tick: Tick) {
        for rx in messages {
            if rx.sender == self.owner {
                continue;
            }
            self.ledger.entry_or(&rx.sender, self.config.prior);
            self.evaluate(&rx.sender, &rx.message, tick);
            self.last.insert(rx.sender.clone(), (rx.message.clone(), tick));
        }
        if !messages.is_empty() {
            self.dirty = true;
        }
        self.flush();
    }

    fn evaluate(&mut self, sender: &AgentName, msg: &Message, tick: Tick) {
        let last = self.last.get(sender).map(|(m, t)| (m.clone(), *t));
        let last = last.as_ref().map(|(m, t)| (m, *t));

        match msg {
            Message::MoveToRoom { .. } => {
                let contradicted = match last {
                    Some((Message::MoveToRoom { .. }, _)) => true,
                    Some((Message::SearchingRoom { .. }, t)) => self.searched_too_fast(t, tick),
                    _ => false,
                };
                self.adjust(sender, Channel::Competence, !contradicted);
            }
            Message::OpenDoor { room } => match last {
                Some((Message::MoveToRoom { room: prev }, _)) if prev != room => {
                    self.adjust(sender, Channel::Reliability, false);
                }
                Some((Message::SearchingRoom { .. }, t)) if self.searched_too_fast(t, tick) => {
                    self.adjust(sender, Channel::Competence, false);
                }
                _ => self.adjust(sender, Channel::Reliability, true),
            },
            Message::SearchingRoom { room } => {
                let contradicted = match last {
                    Some((Message::MoveToRoom { room: prev }, _))
                    | Some((Message::OpenDoor { room: prev }, _)) => prev != room,
                    _ => false,
                };
                self.adjust(sender, Channel::Reliability, !contradicted);
                self.adjust(sender, Channel::Competence, !contradicted);
            }
            Message::FoundBlock { .. } | Message::CanHelp { .. } => {
                self.adjust(sender, Channel::Reliability, true);
            }
            Message::FoundGoalBlock { visualization, location } => {
                let ok = self.is_goal(visualization);
                if ok {
                    self.remember_sighting(sender.clone(), visualization, *location, tick);
                }
                self.adjust(sender, Channel::Reliability, ok);
            }
            Message::HelpCarry { visualization, .. } => {
                let ok = self.is_goal(visualization);
                self.adjust(sender, Channel::Reliability, ok);
            }
            Message::PickUpBlock { visualization, location } => {
                let ok = self.pick_up_corroborated(sender, visualization, *location);
                self.adjust(sender, Channel::Reliability, ok);
                if self.is_goal(visualization) {
                    self.open_pick_up(sender, visualization);
                }
            }
            Message::DropBlock { visualization, location } => {
                match self.check_drop(sender, visualization, *location) {
                    DropVerdict::Consistent => {
                        self.close_pick_up(sender, visualization);
                        self.adjust(sender, Channel::Reliability, true);
                        self.adjust(sender, Channel::Competence, true);
                    }
                    DropVerdict::NotAtDropOff => self.adjust(sender, Channel::Competence, false),
                    DropVerdict::NotAGoalBlock | DropVerdict::NeverPickedUp => {
                        self.adjust(sender, Channel::Reliability, false)
                    }
                }
            }
            Message::GoalBlocks { blocks } => {
                let ok = self.goal_blocks_consistent(blocks);
                self.adjust(sender, Channel::Reliability, ok);
            }
            Message::Reputation { ledger } => {
                if self.is_reliable(sender) {
                    self.merge_reputation(ledger);
                }
            }
        }
    }

    fn searched_too_fast(&self, searched_at: Tick, now: Tick) -> bool {
        now.since(searched_at) < self.config.search_duration_ticks
    }

    fn is_goal(&self, vis: &Visualization) -> bool {
        self.goals.iter().any(|g| g.matches(vis))
    }

    fn goal_blocks_consistent(&self, blocks: &[GoalBlockReport]) -> bool {
        !blocks.is_empty() && blocks.iter().all(|b| self.is_goal(&b.visualization))
    }

    /// A pick-up is believable when the block is a goal block and someone
    /// (the sender, a teammate or the owner) saw it at that location.  The
    /// most recent such report is credited to its reporter when that is a
    /// third teammate.  The block has left, so matching sightings there are
    /// forgotten.
    fn pick_up_corroborated(
        &mut self,
        sender: &AgentName,
        vis: &Visualization,
        location: Location,
    ) -> bool {
        if !self.is_goal(vis) {
            return false;
        }
        let seen_here = |s: &Sighting| s.location == location && s.visualization.matches(vis);
        let reporter = self
            .sightings
            .iter()
            .filter(|s| seen_here(*s))
            .max_by_key(|s| s.tick)
            .map(|s| s.reporter.clone());
        self.sightings.retain(|s| !seen_here(s));
        match reporter {
            Some(r) => {
                if r != *sender && r != self.owner {
                    self.adjust(&r, Channel::Reliability, true);
                }
                true
            }
            None => false,
        }
    }

    fn check_drop(&self, sender: &AgentName, vis: &Visualization, location: Location) -> DropVerdict {
        if !self.is_goal(vis) {
            return DropVerdict::NotAGoalBlock;
        }
        if !self.drop_offs.contains(&location) {
            return DropVerdict::NotAtDropOff;
        }
        let picked_up = self
            .pick_ups
            .get(sender)
            .is_some_and(|open| open.iter().any(|v| v.matches(vis)));
        if picked_up { DropVerdict::Consistent } else { DropVerdict::NeverPickedUp }
    }

    /// Store a sighting, refreshing an identical one instead of duplicating
    /// it and forgetting the oldest beyond `sighting_memory`.
    fn remember_sighting(
        &mut self,
        reporter: AgentName,
        visualization: &Visualization,
        location: Location,
        tick: Tick,
    ) {
        self.sightings.retain(|s| {
            !(s.reporter == reporter && s.location == location && s.visualization == *visualization)
        });
        self.sightings.push_back(Sighting {
            reporter,
            visualization: visualization.clone(),
            location,
            tick,
        });
        while self.sightings.len() > self.config.sighting_memory {
            self.sightings.pop_front();
        }
    }

    /// Nobody carries more goal blocks than there are, so the oldest open
    /// pick-up goes once the list outgrows the goal set.
    fn open_pick_up(&mut self, sender: &AgentName, vis: &Visualization) {
        let limit = self.goals.len().max(1);
        let open = self.pick_ups.entry(sender.clone()).or_default();
        open.push(vis.clone());
        if open.len() > limit {
            open.remove(0);
        }
    }

    fn close_pick_up(&mut self, sender: &AgentName, vis: &Visualization) {
        let Some(open) = self.pick_ups.get_mut(sender) else {
            return;
        };
        if let Some(i) = open.iter().position(|v| v.matches(vis)) {
            open.remove(i);
        }
    }

    fn adjust(&mut self, who: &AgentName, channel: Channel, consistent: bool) {
        let record = self.ledger.entry_or(who, self.config.prior);
        let score = match channel {
            Channel::Reliability => &mut record.reliability,
            Channel::Competence => &mut record.competence,
        };
        if consistent {
            score.increase();
        } else {
            score.decrease();
            tracing::debug!(
                agent = %self.owner,
                teammate = %who,
                channel = ?channel,
                score = %score,
                "contradiction"
            );
        }
    }

    // ── Gossip ────────────────────────────────────────────────────────────

    /// Fold a teammate's reputation table into ours.
    ///
    /// Entries about the owner and about agents we do not know are skipped.
    pub fn merge_reputation(&mut self, remote: &Ledger) {
        let ratio = self.config.gossip_sample_ratio;
        for (name, theirs) in remote.iter() {
            if *name == self.owner {
                continue;
            }
            if let Some(ours) = self.ledger.get_mut(name.as_str()) {
                ours.merge(theirs, ratio);
            }
        }
        self.dirty = true;
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Save the ledger now.
    pub fn persist(&mut self) -> TrustResult<()> {
        self.store.save(&self.owner, &self.ledger)?;
        self.dirty = false;
        Ok(())
    }

    /// Save if anything changed; a failure is logged and retried later.
    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        if let Err(e) = self.persist() {
            tracing::warn!(agent = %self.owner, error = %e, "failed to persist reputation ledger");
        }
    }
}

impl std::fmt::Debug for TrustEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustEngine")
            .field("owner", &self.owner)
            .field("ledger", &self.ledger)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
