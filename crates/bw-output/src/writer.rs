//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentStepRow, OutputResult, TrustRow};

/// Sink for run output.
///
/// Errors are returned to the caller; [`TeamOutputObserver`](crate::TeamOutputObserver)
/// stores the first one for [`take_error`](crate::TeamOutputObserver::take_error).
pub trait OutputWriter {
    /// Write one tick's worth of member steps.
    fn write_steps(&mut self, rows: &[AgentStepRow]) -> OutputResult<()>;

    /// Write a batch of ledger entries.
    fn write_trust(&mut self, rows: &[TrustRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
