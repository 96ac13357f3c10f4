//! The closed set of team messages.

use std::fmt;

use bw_core::{Ledger, Location, Visualization};

/// One goal block as announced at start-up: what it looks like and where it
/// has to be delivered.
#[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct GoalBlockReport {
    pub visualization: Visualization,
    pub drop_off: Location,
}

/// A decoded team message.
///
/// Every variant carries only the fields its kind needs.  Messages are plain
/// values: each receiver decodes its own copy.
#[derive(Clone, PartialEq, Debug)]
pub enum Message {
    /// The sender is heading for `room`.
    MoveToRoom { room: String },
    /// The sender is opening the door of `room`.
    OpenDoor { room: String },
    /// The sender is sweeping the inside of `room`.
    SearchingRoom { room: String },
    /// A block that is not a goal block was seen.
    FoundBlock { visualization: Visualization, location: Location },
    /// A goal block was seen.
    FoundGoalBlock { visualization: Visualization, location: Location },
    /// The sender picked up a goal block.
    PickUpBlock { visualization: Visualization, location: Location },
    /// The sender dropped a goal block, normally on its drop-off tile.
    DropBlock { visualization: Visualization, location: Location },
    /// The sender's view of every goal block, sent once at start-up.
    GoalBlocks { blocks: Vec<GoalBlockReport> },
    /// The sender's reputation table.
    Reputation { ledger: Ledger },
    /// The sender is free to help at `location`.
    CanHelp { location: Location },
    /// The sender cannot carry the block at `location` alone.
    HelpCarry { visualization: Visualization, location: Location },
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::MoveToRoom { .. }     => MessageKind::MoveToRoom,
            Message::OpenDoor { .. }       => MessageKind::OpenDoor,
            Message::SearchingRoom { .. }  => MessageKind::SearchingRoom,
            Message::FoundBlock { .. }     => MessageKind::FoundBlock,
            Message::FoundGoalBlock { .. } => MessageKind::FoundGoalBlock,
            Message::PickUpBlock { .. }    => MessageKind::PickUpBlock,
            Message::DropBlock { .. }      => MessageKind::DropBlock,
            Message::GoalBlocks { .. }     => MessageKind::GoalBlocks,
            Message::Reputation { .. }     => MessageKind::Reputation,
            Message::CanHelp { .. }        => MessageKind::CanHelp,
            Message::HelpCarry { .. }      => MessageKind::HelpCarry,
        }
    }

    /// Room named by a room-scoped message.
    pub fn room(&self) -> Option<&str> {
        match self {
            Message::MoveToRoom { room }
            | Message::OpenDoor { room }
            | Message::SearchingRoom { room } => Some(room),
            _ => None,
        }
    }
}

// ── MessageKind ───────────────────────────────────────────────────────────────

/// Discriminant of [`Message`], used for logging and acceptance rules.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MessageKind {
    MoveToRoom,
    OpenDoor,
    SearchingRoom,
    FoundBlock,
    FoundGoalBlock,
    PickUpBlock,
    DropBlock,
    GoalBlocks,
    Reputation,
    CanHelp,
    HelpCarry,
}

impl MessageKind {
    pub const ALL: [MessageKind; 11] = [
        MessageKind::MoveToRoom,
        MessageKind::OpenDoor,
        MessageKind::SearchingRoom,
        MessageKind::FoundBlock,
        MessageKind::FoundGoalBlock,
        MessageKind::PickUpBlock,
        MessageKind::DropBlock,
        MessageKind::GoalBlocks,
        MessageKind::Reputation,
        MessageKind::CanHelp,
        MessageKind::HelpCarry,
    ];

    /// Kinds that claim something about the sender's own progress through a
    /// room, and therefore also need a competent sender to be believed.
    #[inline]
    pub fn asserts_capability(self) -> bool {
        matches!(
            self,
            MessageKind::MoveToRoom | MessageKind::SearchingRoom | MessageKind::PickUpBlock
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::MoveToRoom     => "move_to_room",
            MessageKind::OpenDoor       => "open_door",
            MessageKind::SearchingRoom  => "searching_room",
            MessageKind::FoundBlock     => "found_block",
            MessageKind::FoundGoalBlock => "found_goal_block",
            MessageKind::PickUpBlock    => "pick_up_block",
            MessageKind::DropBlock      => "drop_block",
            MessageKind::GoalBlocks     => "goal_blocks",
            MessageKind::Reputation     => "reputation",
            MessageKind::CanHelp        => "can_help",
            MessageKind::HelpCarry      => "help_carry",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
