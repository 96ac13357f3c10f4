//! `bw-core`: foundational types for the blocks-world team agents.
//!
//! This crate is a dependency of every other `bw-*` crate.  It intentionally
//! has no `bw-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).  Nothing here can fail, so there is no error type;
//! each crate above defines its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `AgentName`, `ObjectId`, `BlockKey`                      |
//! | [`geo`]         | `Location`, Manhattan distance, `Direction`              |
//! | [`time`]        | `Tick`                                                   |
//! | [`block`]       | `Visualization`, `Colour`, `visualizations_match`        |
//! | [`score`]       | `Score`, `TrustRecord`, `Ledger`                         |
//! | [`rng`]         | `AgentRng` (per-agent)                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `bw-protocol` (wire payloads) and `bw-trust`.  |

pub mod block;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod score;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use block::{Colour, Visualization, visualizations_match};
pub use geo::{Direction, Location};
pub use ids::{AgentName, BlockKey, ObjectId};
pub use rng::AgentRng;
pub use score::{Ledger, Score, TrustRecord};
pub use time::Tick;
