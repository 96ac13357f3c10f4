//! Fluent builder for [`BeliefStore`].
//!
//! # Usage
//!
//! ```rust
//! use bw_belief::BeliefStoreBuilder;
//! use bw_core::{BlockKey, Colour, Location, Visualization};
//!
//! let store = BeliefStoreBuilder::new()
//!     .goal_block(Visualization::new(1, 0.5, Some(Colour::new("#ff0000"))), Location::new(12, 22))
//!     .goal_block(Visualization::new(0, 0.5, Some(Colour::new("#0000ff"))), Location::new(12, 23))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.goal_blocks().len(), 2);
//! assert!(store.is_pending(BlockKey(0)) && store.is_pending(BlockKey(1)));
//! ```

use std::collections::BTreeSet;

use bw_core::{BlockKey, Location, Visualization};

use crate::{BeliefError, BeliefResult, BeliefStore, DoorFilter, GoalBlock};

/// Fluent builder for [`BeliefStore`].
///
/// Goal blocks get keys in the order they are added, so callers should add
/// them in drop-zone order.
#[derive(Default)]
pub struct BeliefStoreBuilder {
    goals: Vec<(Visualization, Location)>,
    door_filter: DoorFilter,
    colour_blind: bool,
}

impl BeliefStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal_block(mut self, visualization: Visualization, drop_off: Location) -> Self {
        self.goals.push((visualization, drop_off));
        self
    }

    pub fn door_filter(mut self, filter: DoorFilter) -> Self {
        self.door_filter = filter;
        self
    }

    /// Strip colour from every goal descriptor on build.
    pub fn colour_blind(mut self, yes: bool) -> Self {
        self.colour_blind = yes;
        self
    }

    pub fn build(self) -> BeliefResult<BeliefStore> {
        if self.goals.is_empty() {
            return Err(BeliefError::NoGoalBlocks);
        }
        let max = usize::from(u8::MAX) + 1;
        if self.goals.len() > max {
            return Err(BeliefError::TooManyGoalBlocks { max, got: self.goals.len() });
        }

        let mut goal_blocks: Vec<GoalBlock> = self
            .goals
            .into_iter()
            .enumerate()
            .map(|(i, (vis, drop_off))| GoalBlock::new(BlockKey(i as u8), vis, drop_off))
            .collect();
        if self.colour_blind {
            goal_blocks.iter_mut().for_each(GoalBlock::strip_colour);
        }
        let not_found_yet: BTreeSet<BlockKey> = goal_blocks.iter().map(GoalBlock::key).collect();

        Ok(BeliefStore {
            goal_blocks,
            carrying: Vec::new(),
            not_found_yet,
            visited_self: BTreeSet::new(),
            visited_reported: BTreeSet::new(),
            door_filter: self.door_filter,
        })
    }
}
