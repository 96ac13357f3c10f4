//! The seam to the world engine.

use bw_agent::{Action, WorldView};
use bw_core::{AgentName, Tick};

/// The environment a [`Team`](crate::Team) plays in.
///
/// The engine owns positions, doors and blocks.  It hands each member a
/// snapshot before the member steps and carries out the member's action
/// afterwards.  An action the world cannot perform (grabbing a block that is
/// gone, walking into a wall) is ignored; the member notices from the next
/// snapshot.
pub trait World {
    /// What `agent` perceives at the start of `tick`.
    fn view_for(&self, agent: &AgentName, tick: Tick) -> WorldView;

    /// Carry out one member's action.
    fn apply(&mut self, agent: &AgentName, action: &Action);

    /// Whether the team's task is done.  The run stops once this holds.
    fn is_complete(&self) -> bool {
        false
    }
}
