//! `bw-belief`: what one agent believes about the world.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`goal`]      | `GoalBlock`: descriptor, drop-off, aligned candidate lists  |
//! | [`store`]     | `BeliefStore`, `DoorFilter`                                 |
//! | [`builder`]   | `BeliefStoreBuilder` (fluent construction)                  |
//! | [`error`]     | `BeliefError`, `BeliefResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types. |
//!
//! A `BeliefStore` is exclusively owned by one agent's controller.  All
//! mutation goes through its methods, which keep every goal block's
//! candidate locations and ids index-aligned.

pub mod builder;
pub mod error;
pub mod goal;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::BeliefStoreBuilder;
pub use error::{BeliefError, BeliefResult};
pub use goal::{Candidate, GoalBlock};
pub use store::{BeliefStore, DoorFilter};
