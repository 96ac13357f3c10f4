//! `bw-output`: run output writers for blocks-world teams.
//!
//! | File               | One row per                                      |
//! |--------------------|--------------------------------------------------|
//! | `agent_steps.csv`  | member per tick: phase, action, messages sent    |
//! | `trust_scores.csv` | owner × teammate per snapshot: both trust scores |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`TeamOutputObserver`], which implements `bw_sim::TeamObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bw_output::{CsvWriter, TeamOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TeamOutputObserver::new(writer);
//! team.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TeamOutputObserver;
pub use row::{AgentStepRow, TrustRow};
pub use writer::OutputWriter;
