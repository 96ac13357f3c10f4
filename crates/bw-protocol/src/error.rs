use thiserror::Error;

use crate::MessageKind;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unrecognised message: {0:?}")]
    UnknownKind(String),

    #[error("{kind} message is missing its {field}")]
    MissingField {
        kind: MessageKind,
        field: &'static str,
    },

    #[error("room name {0:?} is empty or padded with whitespace")]
    RoomName(String),

    #[error("malformed location {0:?}")]
    Location(String),

    #[error("JSON payload error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
