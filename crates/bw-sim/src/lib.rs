//! `bw-sim`: deterministic tick driver for a team of blocks-world agents.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks, until World::is_complete:
//!   ① Collect: World::view_for and the bus inbox, per member.
//!   ② Step:    PhaseController::step for every member
//!               (parallel with the `parallel` feature).
//!   ③ Apply:   in ascending member name:
//!                 action   → World::apply
//!                 messages → MessageBus::publish
//!   ④ Deliver: messages published at t reach every other member at t+1.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                         |
//! |------------|------------------------------------------------|
//! | `parallel` | Steps the controllers on Rayon's thread pool.  |
//! | `fx-hash`  | FxHash instead of SipHash for the inbox map.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bw_sim::{NoopObserver, TeamBuilder, TeamConfig};
//!
//! let config = TeamConfig::from_toml_str(TEAM_TOML)?;
//! let mut team = TeamBuilder::new(config, arena).build()?;
//! let summary = team.run(&mut NoopObserver)?;
//! println!("done after {} ticks: {}", summary.ticks, summary.completed);
//! ```

pub mod builder;
pub mod bus;
pub mod config;
pub mod error;
pub mod observer;
pub mod team;
pub mod world;


pub use builder::TeamBuilder;
pub use bus::MessageBus;
pub use config::{MemberConfig, TeamConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TeamObserver};
pub use team::{RunSummary, Team};
pub use world::World;
