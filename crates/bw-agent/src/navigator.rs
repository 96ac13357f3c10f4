//! Motion seam.
//!
//! Path finding belongs to the host.  The controller only hands a navigator a
//! list of waypoints and asks it, once per tick, for the next single-tile
//! move.  `None` from [`Navigator::step`] means every waypoint was reached.

use std::collections::VecDeque;

use bw_core::{Direction, Location};

use crate::{Action, NavError, NavResult, WorldView};

/// Pluggable waypoint follower.
///
/// Implementations must be `Send` so controllers can be stepped on a thread
/// pool.
pub trait Navigator: Send {
    /// Replace the current route with one visiting `waypoints` in order.
    fn plan_route(&mut self, waypoints: &[Location]) -> NavResult<()>;

    /// Next move towards the current waypoint, `None` on arrival.
    fn step(&mut self, view: &WorldView) -> Option<Action>;

    /// Forget the current route.
    fn reset(&mut self);
}

// ── WaypointNavigator ─────────────────────────────────────────────────────────

/// Greedy Manhattan walker for open grids: closes the `x` gap first, then
/// the `y` gap.  It does not know about walls.
#[derive(Debug, Default, Clone)]
pub struct WaypointNavigator {
    waypoints: VecDeque<Location>,
}

impl WaypointNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.waypoints.len()
    }
}

impl Navigator for WaypointNavigator {
    fn plan_route(&mut self, waypoints: &[Location]) -> NavResult<()> {
        if waypoints.is_empty() {
            return Err(NavError::NoWaypoints);
        }
        self.waypoints = waypoints.iter().copied().collect();
        Ok(())
    }

    fn step(&mut self, view: &WorldView) -> Option<Action> {
        let here = view.agent_location;
        while self.waypoints.front() == Some(&here) {
            self.waypoints.pop_front();
        }
        let target = *self.waypoints.front()?;
        let dir = if target.x > here.x {
            Direction::East
        } else if target.x < here.x {
            Direction::West
        } else if target.y > here.y {
            Direction::South
        } else {
            Direction::North
        };
        Some(Action::Move(dir))
    }

    fn reset(&mut self) {
        self.waypoints.clear();
    }
}
