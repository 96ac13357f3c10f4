//! Sentence codec.
//!
//! Each kind has a fixed leading phrase.  Block descriptors are embedded as
//! JSON objects and locations as `(x, y)`:
//!
//! | Kind             | Sentence                                                  |
//! |------------------|-----------------------------------------------------------|
//! | `MoveToRoom`     | `Moving to <room>`                                        |
//! | `OpenDoor`       | `Opening door of <room>`                                  |
//! | `SearchingRoom`  | `Searching through <room>`                                |
//! | `FoundBlock`     | `Found block <vis> at location (x, y)`                    |
//! | `FoundGoalBlock` | `Found goal block <vis> at location (x, y)`               |
//! | `PickUpBlock`    | `Picking up goal block <vis> at location (x, y)`          |
//! | `DropBlock`      | `Dropped goal block <vis> at drop location (x, y)`        |
//! | `GoalBlocks`     | `Goal blocks [{"visualization": <vis>, "drop_off": [x, y]}, ..]` |
//! | `Reputation`     | `Reputation {"<name>": {"reliability": [a, t], ..}, ..}`  |
//! | `CanHelp`        | `Can help at location (x, y)`                             |
//! | `HelpCarry`      | `Need help carrying <vis> at location (x, y)`             |

use bw_core::{Location, Visualization};

use crate::{Message, MessageKind, ProtocolError, ProtocolResult};

const MOVE_TO_ROOM: &str = "Moving to ";
const OPEN_DOOR: &str = "Opening door of ";
const SEARCHING_ROOM: &str = "Searching through ";
const FOUND_BLOCK: &str = "Found block ";
const FOUND_GOAL_BLOCK: &str = "Found goal block ";
const PICK_UP_BLOCK: &str = "Picking up goal block ";
const DROP_BLOCK: &str = "Dropped goal block ";
const GOAL_BLOCKS: &str = "Goal blocks ";
const REPUTATION: &str = "Reputation ";
const CAN_HELP: &str = "Can help at location ";
const HELP_CARRY: &str = "Need help carrying ";

const AT_LOCATION: &str = " at location ";
const AT_DROP_LOCATION: &str = " at drop location ";

/// Render `msg` as its sentence.
///
/// Room names must be non-empty and carry no surrounding whitespace, since
/// the decoder trims the remainder of the sentence.  Otherwise only the JSON
/// payloads can fail, and for well-formed values they never do.
pub fn encode(msg: &Message) -> ProtocolResult<String> {
    let sentence = match msg {
        Message::MoveToRoom { room }    => format!("{MOVE_TO_ROOM}{}", sendable(room)?),
        Message::OpenDoor { room }      => format!("{OPEN_DOOR}{}", sendable(room)?),
        Message::SearchingRoom { room } => format!("{SEARCHING_ROOM}{}", sendable(room)?),
        Message::FoundBlock { visualization, location } => {
            block_sentence(FOUND_BLOCK, visualization, AT_LOCATION, *location)?
        }
        Message::FoundGoalBlock { visualization, location } => {
            block_sentence(FOUND_GOAL_BLOCK, visualization, AT_LOCATION, *location)?
        }
        Message::PickUpBlock { visualization, location } => {
            block_sentence(PICK_UP_BLOCK, visualization, AT_LOCATION, *location)?
        }
        Message::DropBlock { visualization, location } => {
            block_sentence(DROP_BLOCK, visualization, AT_DROP_LOCATION, *location)?
        }
        Message::HelpCarry { visualization, location } => {
            block_sentence(HELP_CARRY, visualization, AT_LOCATION, *location)?
        }
        Message::GoalBlocks { blocks } => {
            format!("{GOAL_BLOCKS}{}", serde_json::to_string(blocks)?)
        }
        Message::Reputation { ledger } => {
            format!("{REPUTATION}{}", serde_json::to_string(ledger)?)
        }
        Message::CanHelp { location } => format!("{CAN_HELP}{location}"),
    };
    Ok(sentence)
}

fn sendable(room: &str) -> ProtocolResult<&str> {
    if room.is_empty() || room.trim() != room {
        return Err(ProtocolError::RoomName(room.to_owned()));
    }
    Ok(room)
}

fn block_sentence(
    lead: &str,
    vis: &Visualization,
    joiner: &str,
    location: Location,
) -> ProtocolResult<String> {
    Ok(format!("{lead}{}{joiner}{location}", serde_json::to_string(vis)?))
}

/// Parse a sentence back into a [`Message`].
pub fn decode(content: &str) -> ProtocolResult<Message> {
    let content = content.trim_start();

    if let Some(rest) = content.strip_prefix(MOVE_TO_ROOM) {
        return Ok(Message::MoveToRoom { room: room(rest, MessageKind::MoveToRoom)? });
    }
    if let Some(rest) = content.strip_prefix(OPEN_DOOR) {
        return Ok(Message::OpenDoor { room: room(rest, MessageKind::OpenDoor)? });
    }
    if let Some(rest) = content.strip_prefix(SEARCHING_ROOM) {
        return Ok(Message::SearchingRoom { room: room(rest, MessageKind::SearchingRoom)? });
    }
    if let Some(rest) = content.strip_prefix(FOUND_GOAL_BLOCK) {
        let (visualization, location) = block_fields(rest, MessageKind::FoundGoalBlock)?;
        return Ok(Message::FoundGoalBlock { visualization, location });
    }
    if let Some(rest) = content.strip_prefix(FOUND_BLOCK) {
        let (visualization, location) = block_fields(rest, MessageKind::FoundBlock)?;
        return Ok(Message::FoundBlock { visualization, location });
    }
    if let Some(rest) = content.strip_prefix(PICK_UP_BLOCK) {
        let (visualization, location) = block_fields(rest, MessageKind::PickUpBlock)?;
        return Ok(Message::PickUpBlock { visualization, location });
    }
    if let Some(rest) = content.strip_prefix(DROP_BLOCK) {
        let (visualization, location) = block_fields(rest, MessageKind::DropBlock)?;
        return Ok(Message::DropBlock { visualization, location });
    }
    if let Some(rest) = content.strip_prefix(HELP_CARRY) {
        let (visualization, location) = block_fields(rest, MessageKind::HelpCarry)?;
        return Ok(Message::HelpCarry { visualization, location });
    }
    if let Some(rest) = content.strip_prefix(GOAL_BLOCKS) {
        return Ok(Message::GoalBlocks { blocks: serde_json::from_str(rest.trim())? });
    }
    if let Some(rest) = content.strip_prefix(REPUTATION) {
        return Ok(Message::Reputation { ledger: serde_json::from_str(rest.trim())? });
    }
    if let Some(rest) = content.strip_prefix(CAN_HELP) {
        return Ok(Message::CanHelp { location: location(rest, MessageKind::CanHelp)? });
    }

    Err(ProtocolError::UnknownKind(content.to_owned()))
}

// ── Field extraction ──────────────────────────────────────────────────────────

/// The whole trimmed remainder; room names may contain spaces.
fn room(rest: &str, kind: MessageKind) -> ProtocolResult<String> {
    match rest.trim() {
        "" => Err(ProtocolError::MissingField { kind, field: "room" }),
        name => Ok(name.to_owned()),
    }
}

/// The JSON object spans from the first `{` to the last `}`; the location
/// follows it.
fn block_fields(rest: &str, kind: MessageKind) -> ProtocolResult<(Visualization, Location)> {
    let (start, end) = match (rest.find('{'), rest.rfind('}')) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => return Err(ProtocolError::MissingField { kind, field: "visualization" }),
    };
    let vis: Visualization = serde_json::from_str(&rest[start..=end])?;
    let loc = location(&rest[end + 1..], kind)?;
    Ok((vis, loc))
}

fn location(rest: &str, kind: MessageKind) -> ProtocolResult<Location> {
    let open = rest
        .rfind('(')
        .ok_or(ProtocolError::MissingField { kind, field: "location" })?;
    let inner = &rest[open + 1..];
    let close = inner
        .find(')')
        .ok_or_else(|| ProtocolError::Location(rest.trim().to_owned()))?;
    let (x, y) = inner[..close]
        .split_once(',')
        .ok_or_else(|| ProtocolError::Location(rest.trim().to_owned()))?;
    match (x.trim().parse::<i32>(), y.trim().parse::<i32>()) {
        (Ok(x), Ok(y)) => Ok(Location::new(x, y)),
        _ => Err(ProtocolError::Location(rest.trim().to_owned())),
    }
}
