//! `BeliefStore`: everything one agent remembers between ticks.

use std::collections::BTreeSet;

use bw_core::{BlockKey, Location, ObjectId, Visualization};

use crate::{BeliefError, BeliefResult, Candidate, GoalBlock};

// ── DoorFilter ────────────────────────────────────────────────────────────────

/// Which doors count as worth exploring.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorFilter {
    /// Every door.
    None,
    /// Doors of rooms this agent has not swept itself.
    UnvisitedBySelf,
    /// Doors of rooms nobody on the team has reported.
    #[default]
    UnvisitedByTeam,
}

// ── BeliefStore ───────────────────────────────────────────────────────────────

/// Goal blocks, carried blocks and explored rooms of one agent.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeliefStore {
    pub(crate) goal_blocks: Vec<GoalBlock>,
    pub(crate) carrying: Vec<(BlockKey, ObjectId)>,
    pub(crate) not_found_yet: BTreeSet<BlockKey>,
    pub(crate) visited_self: BTreeSet<String>,
    pub(crate) visited_reported: BTreeSet<String>,
    pub(crate) door_filter: DoorFilter,
}

impl BeliefStore {
    // ── Goal blocks ───────────────────────────────────────────────────────

    pub fn goal_blocks(&self) -> &[GoalBlock] {
        &self.goal_blocks
    }

    pub fn goal_block(&self, key: BlockKey) -> Option<&GoalBlock> {
        self.goal_blocks.get(key.index())
    }

    fn goal_block_mut(&mut self, key: BlockKey) -> BeliefResult<&mut GoalBlock> {
        self.goal_blocks
            .get_mut(key.index())
            .ok_or(BeliefError::UnknownBlock(key))
    }

    pub fn matches_any(&self, vis: &Visualization) -> bool {
        self.goal_blocks.iter().any(|gb| gb.visualization().matches(vis))
    }

    /// Append a candidate to one goal block.  Returns `true` if it was new.
    pub fn record_candidate(
        &mut self,
        key: BlockKey,
        location: Location,
        id: Option<ObjectId>,
    ) -> BeliefResult<bool> {
        Ok(self.goal_block_mut(key)?.record(location, id))
    }

    /// Record a perceived or reported block against every goal block it
    /// matches.  Returns the keys that gained a new candidate.
    pub fn record_sighting(
        &mut self,
        vis: &Visualization,
        location: Location,
        id: Option<ObjectId>,
    ) -> Vec<BlockKey> {
        self.goal_blocks
            .iter_mut()
            .filter(|gb| gb.visualization().matches(vis))
            .filter_map(|gb| gb.record(location, id.clone()).then_some(gb.key()))
            .collect()
    }

    /// Stale-belief correction for one goal block.
    pub fn remove_candidate(&mut self, key: BlockKey, location: Location) -> BeliefResult<usize> {
        Ok(self.goal_block_mut(key)?.remove_at(location))
    }

    /// Drop candidates at `location` for every goal block matching `vis`.
    pub fn remove_candidates_at(&mut self, vis: &Visualization, location: Location) -> usize {
        self.goal_blocks
            .iter_mut()
            .filter(|gb| gb.visualization().matches(vis))
            .map(|gb| gb.remove_at(location))
            .sum()
    }

    /// Candidates of blocks that still have to be fetched, in key order.
    pub fn pending_candidates(&self) -> impl Iterator<Item = (BlockKey, Candidate<'_>)> + '_ {
        self.goal_blocks
            .iter()
            .filter(|gb| self.is_pending(gb.key()))
            .flat_map(|gb| gb.candidates().map(move |c| (gb.key(), c)))
    }

    /// Goal block whose drop-off is `location`.
    pub fn drop_off_at(&self, location: Location) -> Option<BlockKey> {
        self.goal_blocks
            .iter()
            .find(|gb| gb.drop_off() == location)
            .map(GoalBlock::key)
    }

    pub fn is_drop_off(&self, location: Location) -> bool {
        self.drop_off_at(location).is_some()
    }

    // ── Fetch progress ────────────────────────────────────────────────────

    /// `true` while `key` is neither carried by this agent nor delivered.
    pub fn is_pending(&self, key: BlockKey) -> bool {
        self.not_found_yet.contains(&key)
    }

    pub fn all_delivered(&self) -> bool {
        self.not_found_yet.is_empty() && self.carrying.is_empty()
    }

    /// The block is in hand: it stops being something to look for.
    pub fn mark_carrying(&mut self, key: BlockKey, id: ObjectId) {
        self.not_found_yet.remove(&key);
        self.carrying.push((key, id));
    }

    /// Someone delivered `key`.  Returns `true` if it was still pending.
    pub fn mark_delivered(&mut self, key: BlockKey) -> bool {
        self.not_found_yet.remove(&key)
    }

    /// Put `key` back on the list of blocks to find.
    pub fn reopen(&mut self, key: BlockKey) {
        self.not_found_yet.insert(key);
    }

    /// Stop carrying `key`; returns the object id that was held.
    pub fn release(&mut self, key: BlockKey) -> Option<ObjectId> {
        let pos = self.carrying.iter().position(|(k, _)| *k == key)?;
        Some(self.carrying.remove(pos).1)
    }

    pub fn carrying(&self) -> &[(BlockKey, ObjectId)] {
        &self.carrying
    }

    pub fn carrying_count(&self) -> usize {
        self.carrying.len()
    }

    pub fn is_carrying(&self, key: BlockKey) -> bool {
        self.carrying.iter().any(|(k, _)| *k == key)
    }

    /// The carried block to deliver first: the lowest key.
    pub fn next_delivery(&self) -> Option<(BlockKey, &ObjectId)> {
        self.carrying
            .iter()
            .min_by_key(|(k, _)| *k)
            .map(|(k, id)| (*k, id))
    }

    // ── Rooms ─────────────────────────────────────────────────────────────

    pub fn visit_self(&mut self, room: &str) {
        self.visited_self.insert(room.to_owned());
    }

    pub fn visit_reported(&mut self, room: &str) {
        self.visited_reported.insert(room.to_owned());
    }

    pub fn visited_by_self(&self, room: &str) -> bool {
        self.visited_self.contains(room)
    }

    pub fn visited_by_team(&self, room: &str) -> bool {
        self.visited_self.contains(room) || self.visited_reported.contains(room)
    }

    pub fn door_filter(&self) -> DoorFilter {
        self.door_filter
    }

    pub fn set_door_filter(&mut self, filter: DoorFilter) {
        self.door_filter = filter;
    }

    /// Whether a door into `room` passes `filter`.
    pub fn admits(&self, filter: DoorFilter, room: &str) -> bool {
        match filter {
            DoorFilter::None            => true,
            DoorFilter::UnvisitedBySelf => !self.visited_by_self(room),
            DoorFilter::UnvisitedByTeam => !self.visited_by_team(room),
        }
    }
}
