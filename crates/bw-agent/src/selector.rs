//! Goal selection.
//!
//! Greedy, first match wins:
//!
//! 1. hands full → deliver
//! 2. a pending goal block has a known candidate → fetch the cheapest
//! 3. something in hand and nothing left to fetch → deliver
//! 4. closed doors nobody on the team explored → open the nearest
//! 5. closed doors this agent did not explore → open the nearest
//! 6. open doors this agent did not explore → sweep the nearest
//! 7. any open door → sweep the nearest
//! 8. otherwise idle

use bw_belief::{BeliefStore, DoorFilter};
use bw_core::{BlockKey, Location, ObjectId};

use crate::{Phase, WorldView};

/// The selector's answer: where the machine starts, and with which door
/// filter when it starts by picking a door.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Selection {
    pub phase: Phase,
    pub door_filter: Option<DoorFilter>,
}

impl Selection {
    fn phase(phase: Phase) -> Self {
        Self { phase, door_filter: None }
    }

    fn door(phase: Phase, filter: DoorFilter) -> Self {
        Self { phase, door_filter: Some(filter) }
    }
}

/// One fetch target picked by [`TaskSelector::plan_fetch`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FetchPlan {
    pub key: BlockKey,
    pub location: Location,
    /// Object id, when the candidate was perceived rather than reported.
    pub id: Option<ObjectId>,
    pub drop_off: Location,
    pub cost: u32,
}

#[derive(Copy, Clone, Debug)]
pub struct TaskSelector {
    capacity: usize,
}

impl TaskSelector {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Next phase for an idle agent, `None` when there is nothing to do.
    pub fn select_phase(&self, view: &WorldView, belief: &BeliefStore) -> Option<Selection> {
        let carrying = belief.carrying_count();
        if carrying >= self.capacity {
            return Some(Selection::phase(Phase::PlanApproachDropOff));
        }
        if belief.pending_candidates().next().is_some() {
            return Some(Selection::phase(Phase::PlanApproachBlock));
        }
        if carrying > 0 {
            return Some(Selection::phase(Phase::PlanApproachDropOff));
        }

        let has_door = |open: bool, filter: DoorFilter| {
            view.doors()
                .any(|d| d.is_open == open && belief.admits(filter, d.room()))
        };
        [
            (false, DoorFilter::UnvisitedByTeam, Phase::SelectClosedDoor),
            (false, DoorFilter::UnvisitedBySelf, Phase::SelectClosedDoor),
            (true, DoorFilter::UnvisitedBySelf, Phase::SelectOpenDoor),
            (true, DoorFilter::None, Phase::SelectOpenDoor),
        ]
        .into_iter()
        .find(|(open, filter, _)| has_door(*open, *filter))
        .map(|(_, filter, phase)| Selection::door(phase, filter))
    }

    /// Cheapest fetch from `agent`.
    ///
    /// Single leg: `d(agent, l) + d(l, drop(k))`.  With room for two blocks
    /// ordered pairs of distinct pending blocks are also tried:
    /// `d(agent, l1) + d(l1, l2) + d(l2, drop(k2))`, and the first leg of the
    /// best pair is returned.  Once it is in hand the second leg is the
    /// cheapest single fetch from `l1`, so replanning picks it up.  Ties keep
    /// the first minimum in key order.
    pub fn plan_fetch(&self, agent: Location, belief: &BeliefStore) -> Option<FetchPlan> {
        let spare = self.capacity.saturating_sub(belief.carrying_count());
        let candidates: Vec<(BlockKey, Location, Option<ObjectId>, Location)> = belief
            .pending_candidates()
            .filter_map(|(key, c)| {
                let drop_off = belief.goal_block(key)?.drop_off();
                Some((key, c.location, c.id.cloned(), drop_off))
            })
            .collect();

        let mut best: Option<FetchPlan> = None;
        let mut consider = |plan: FetchPlan| {
            if best.as_ref().is_none_or(|b| plan.cost < b.cost) {
                best = Some(plan);
            }
        };

        let distinct_keys = {
            let mut keys: Vec<BlockKey> = candidates.iter().map(|c| c.0).collect();
            keys.dedup();
            keys.len()
        };

        if spare >= 2 && distinct_keys >= 2 {
            for (k1, l1, id1, d1) in &candidates {
                for (k2, l2, _, d2) in &candidates {
                    if k1 == k2 {
                        continue;
                    }
                    consider(FetchPlan {
                        key: *k1,
                        location: *l1,
                        id: id1.clone(),
                        drop_off: *d1,
                        cost: agent.manhattan(*l1) + l1.manhattan(*l2) + l2.manhattan(*d2),
                    });
                }
            }
        } else {
            for (key, loc, id, drop_off) in &candidates {
                consider(FetchPlan {
                    key: *key,
                    location: *loc,
                    id: id.clone(),
                    drop_off: *drop_off,
                    cost: agent.manhattan(*loc) + loc.manhattan(*drop_off),
                });
            }
        }
        best
    }
}
