//! Strongly typed identifier wrappers.
//!
//! Agents and world objects are addressed by the string ids the world engine
//! assigns (`"agent1"`, `"Door_12"`), so those wrappers own a `String`.  Goal
//! blocks are addressed by their position in the drop zone, a small integer.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed wrapper around an owned string id.
macro_rules! named_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

named_id! {
    /// Name of a team member.  Doubles as the message sender id and the key
    /// of the persisted reputation ledger.
    pub struct AgentName;
}

named_id! {
    /// World object id (doors, blocks, drop-zone markers).
    pub struct ObjectId;
}

/// Index of a goal block in the drop zone, `0..GOAL_BLOCK_COUNT`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockKey(pub u8);

impl BlockKey {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block{}", self.0)
    }
}

impl TryFrom<usize> for BlockKey {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<BlockKey, Self::Error> {
        u8::try_from(n).map(BlockKey)
    }
}
