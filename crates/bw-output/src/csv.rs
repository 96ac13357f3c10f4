//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_steps.csv`
//! - `trust_scores.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentStepRow, OutputResult, TrustRow};

pub const STEPS_FILE: &str = "agent_steps.csv";
pub const TRUST_FILE: &str = "trust_scores.csv";

/// Writes run output to two CSV files.
pub struct CsvWriter {
    steps: Writer<File>,
    trust: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) both files and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut steps = Writer::from_path(dir.join(STEPS_FILE))?;
        steps.write_record(["tick", "agent", "phase", "action", "messages_sent"])?;

        let mut trust = Writer::from_path(dir.join(TRUST_FILE))?;
        trust.write_record([
            "tick",
            "owner",
            "teammate",
            "reliability_accurate",
            "reliability_total",
            "competence_accurate",
            "competence_total",
        ])?;

        Ok(Self { steps, trust, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_steps(&mut self, rows: &[AgentStepRow]) -> OutputResult<()> {
        for row in rows {
            self.steps.write_record(&[
                row.tick.to_string(),
                row.agent.clone(),
                row.phase.clone(),
                row.action.clone(),
                row.messages_sent.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_trust(&mut self, rows: &[TrustRow]) -> OutputResult<()> {
        for row in rows {
            self.trust.write_record(&[
                row.tick.to_string(),
                row.owner.clone(),
                row.teammate.clone(),
                row.reliability_accurate.to_string(),
                row.reliability_total.to_string(),
                row.competence_accurate.to_string(),
                row.competence_total.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.trust.flush()?;
        Ok(())
    }
}
