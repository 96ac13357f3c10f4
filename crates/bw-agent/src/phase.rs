//! States of the per-agent task machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One phase of the cyclic task machine.
///
/// There is no terminal phase.  "No phase" (`Option<Phase>::None`) means the
/// task selector has to pick the next goal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Phase {
    SelectClosedDoor,
    ApproachDoor,
    OpenDoor,
    SelectOpenDoor,
    ApproachOpenDoor,
    PlanRoomSweep,
    SweepRoom,
    PlanApproachBlock,
    ApproachBlock,
    Grab,
    PlanApproachDropOff,
    ApproachDropOff,
    Drop,
}

impl Phase {
    /// Multi-tick movement phases.
    pub fn is_approach(self) -> bool {
        matches!(
            self,
            Phase::ApproachDoor | Phase::ApproachOpenDoor | Phase::ApproachBlock | Phase::ApproachDropOff
        )
    }

    /// Phases an abort policy may abandon.
    pub fn is_abortable(self) -> bool {
        self.is_approach() || self == Phase::SweepRoom
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::SelectClosedDoor    => "select_closed_door",
            Phase::ApproachDoor        => "approach_door",
            Phase::OpenDoor            => "open_door",
            Phase::SelectOpenDoor      => "select_open_door",
            Phase::ApproachOpenDoor    => "approach_open_door",
            Phase::PlanRoomSweep       => "plan_room_sweep",
            Phase::SweepRoom           => "sweep_room",
            Phase::PlanApproachBlock   => "plan_approach_block",
            Phase::ApproachBlock       => "approach_block",
            Phase::Grab                => "grab",
            Phase::PlanApproachDropOff => "plan_approach_drop_off",
            Phase::ApproachDropOff     => "approach_drop_off",
            Phase::Drop                => "drop",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
