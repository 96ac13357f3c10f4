//! `bw-agent`: the decision core of one blocks-world agent.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                          |
//! |----------------|-------------------------------------------------------------------|
//! | [`world`]      | `WorldView`, `WorldObject`: the per-tick read-only snapshot       |
//! | [`action`]     | `Action`: move, open door, grab, drop                             |
//! | [`navigator`]  | `Navigator` trait, `WaypointNavigator`                            |
//! | [`phase`]      | `Phase`: states of the task machine                               |
//! | [`policy`]     | Policy traits, stock policies, `PolicyBundle`, `Archetype`        |
//! | [`selector`]   | `TaskSelector`: next goal and cheapest fetch                      |
//! | [`controller`] | `PhaseController`, `ControllerBuilder`, `StepOutput`              |
//! | [`config`]     | `AgentConfig` (TOML)                                              |
//! | [`error`]      | `AgentError`, `NavError`                                          |
//!
//! # Archetypes
//!
//! Careful, colour-blind, lying, lazy and strong agents share one
//! controller.  Each [`Archetype`] is a preset [`PolicyBundle`]; the phase
//! machine itself is written once.

pub mod action;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigator;
pub mod phase;
pub mod policy;
pub mod selector;
pub mod world;


pub use action::Action;
pub use config::AgentConfig;
pub use controller::{ControllerBuilder, PhaseController, StepOutput};
pub use error::{AgentError, AgentResult, NavError, NavResult};
pub use navigator::{Navigator, WaypointNavigator};
pub use phase::Phase;
pub use policy::{
    ActionAbortPolicy, Archetype, CarryCapacity, ColourBlind, Committed, FixedCapacity,
    FullPerception, LazyAbort, Liar, OutboundContext, OutboundMessagePolicy, PerceptionFilter,
    PolicyBundle, Truthful,
};
pub use selector::{FetchPlan, Selection, TaskSelector};
pub use world::{COLLECTABLE_TAG, DOOR_TAG, DROP_ZONE_TAG, WorldObject, WorldView};
