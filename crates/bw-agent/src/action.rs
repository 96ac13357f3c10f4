//! Environment actions.

use std::fmt;

use bw_core::{Direction, ObjectId};

/// The single physical action an agent may take in a tick.
///
/// "Do nothing" is the absence of an action (`Option<Action>::None`).
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Action {
    Move(Direction),
    OpenDoor(ObjectId),
    Grab(ObjectId),
    Drop(ObjectId),
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move(_)     => "move",
            Action::OpenDoor(_) => "open_door",
            Action::Grab(_)     => "grab",
            Action::Drop(_)     => "drop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(d)      => write!(f, "move {d}"),
            Action::OpenDoor(id) => write!(f, "open_door {id}"),
            Action::Grab(id)     => write!(f, "grab {id}"),
            Action::Drop(id)     => write!(f, "drop {id}"),
        }
    }
}
