//! `TeamOutputObserver<W>` bridges `TeamObserver` to an `OutputWriter`.

use bw_agent::{PhaseController, StepOutput};
use bw_core::Tick;
use bw_sim::{RunSummary, TeamObserver};

use crate::row::{AgentStepRow, TrustRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TeamObserver`] that writes member steps and ledger snapshots to any
/// [`OutputWriter`] backend.
///
/// Steps are buffered per tick and written at the end of the tick.  Errors
/// from the writer are stored because `TeamObserver` methods have no return
/// value.  After `team.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct TeamOutputObserver<W: OutputWriter> {
    writer: W,
    steps: Vec<AgentStepRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TeamOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, steps: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any) after `team.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> TeamObserver for TeamOutputObserver<W> {
    fn on_agent_step(&mut self, tick: Tick, agent: &PhaseController, output: &StepOutput) {
        self.steps.push(AgentStepRow {
            tick: tick.0,
            agent: agent.name().to_string(),
            phase: agent.phase().map(|p| p.to_string()).unwrap_or_default(),
            action: output.action.as_ref().map(|a| a.to_string()).unwrap_or_default(),
            messages_sent: output.messages.len() as u64,
        });
    }

    fn on_tick_end(&mut self, _tick: Tick, _actions: usize) {
        if self.steps.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.steps);
        let result = self.writer.write_steps(&rows);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, members: &[PhaseController]) {
        let rows: Vec<TrustRow> = members
            .iter()
            .flat_map(|m| {
                m.trust().ledger().iter().map(move |(teammate, record)| TrustRow {
                    tick: tick.0,
                    owner: m.name().to_string(),
                    teammate: teammate.to_string(),
                    reliability_accurate: record.reliability.accurate(),
                    reliability_total: record.reliability.total(),
                    competence_accurate: record.competence.accurate(),
                    competence_total: record.competence.total(),
                })
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_trust(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
