//! `bw-trust`: deciding which teammates to believe.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`config`]  | `TrustConfig` (thresholds, freshness window, gossip ratio, prior) |
//! | [`store`]   | `ReputationStore` trait, `JsonFileStore`, `MemoryStore`         |
//! | [`engine`]  | `TrustEngine`: `accept`, `update`, snapshot/merge, persistence  |
//! | [`error`]   | `TrustError`, `TrustResult<T>`                                  |
//!
//! # Scoring model
//!
//! Every teammate has a reliability and a competence [`Score`](bw_core::Score).
//! Each evaluated message is checked against the sender's own previous
//! message, its open pick-ups, recent sightings and the known goal blocks; the outcome bumps `total` and,
//! when no contradiction is found, `accurate`.  Contradictions are never
//! errors, only lower scores.
//!
//! The ledger is the only state that survives a run.  It is loaded once
//! through a [`ReputationStore`] and written back after every tick that
//! processed messages.

pub mod config;
pub mod engine;
pub mod error;
pub mod store;


pub use config::TrustConfig;
pub use engine::TrustEngine;
pub use error::{TrustError, TrustResult};
pub use store::{JsonFileStore, MemoryStore, ReputationStore};
