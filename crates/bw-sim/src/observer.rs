//! Team observer trait for progress reporting and data collection.

use bw_agent::{PhaseController, StepOutput};
use bw_core::Tick;

use crate::RunSummary;

/// Callbacks invoked by [`Team::run`][crate::Team::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Drops(usize);
///
/// impl TeamObserver for Drops {
///     fn on_agent_step(&mut self, _tick: Tick, _agent: &PhaseController, out: &StepOutput) {
///         if matches!(out.action, Some(Action::Drop(_))) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait TeamObserver {
    /// Called at the very start of each tick, before any member steps.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per member per tick, in ascending name order, just before
    /// the member's action is applied to the world.
    fn on_agent_step(&mut self, _tick: Tick, _agent: &PhaseController, _output: &StepOutput) {}

    /// Called at the end of each tick.
    ///
    /// `actions` is the number of members that acted this tick.
    fn on_tick_end(&mut self, _tick: Tick, _actions: usize) {}

    /// Called every `output_interval_ticks` ticks with every member in
    /// ascending name order, for phase and ledger snapshots.
    fn on_snapshot(&mut self, _tick: Tick, _members: &[PhaseController]) {}

    /// Called once when the run stops.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`TeamObserver`] that does nothing.
pub struct NoopObserver;

impl TeamObserver for NoopObserver {}
