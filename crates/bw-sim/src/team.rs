//! The `Team` struct and its tick loop.

use bw_agent::{PhaseController, StepOutput, WorldView};
use bw_core::{AgentName, Tick};
use bw_protocol::Envelope;

use crate::{MessageBus, SimResult, TeamConfig, TeamObserver, World};

/// How a run ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RunSummary {
    /// Ticks processed by this call.
    pub ticks: u64,
    /// Whether the world reported the task done.
    pub completed: bool,
}

// ── Team ──────────────────────────────────────────────────────────────────────

/// Drives a team of controllers against a [`World`].
///
/// Each tick:
///
/// 1. **Collect** (sequential): every member's world view and the inbox the
///    bus delivered for this tick.
/// 2. **Step** (optionally parallel with the `parallel` feature): every
///    controller decides on the same pre-tick world.
/// 3. **Apply** (sequential, ascending member name): actions go to the
///    world, messages go to the bus.
/// 4. **Deliver**: this tick's messages become next tick's inboxes.
///
/// Create via [`TeamBuilder`][crate::TeamBuilder].
pub struct Team<W: World> {
    pub config: TeamConfig,
    pub world: W,
    /// Sorted by name.
    members: Vec<PhaseController>,
    bus: MessageBus,
    tick: Tick,
}

impl<W: World> Team<W> {
    pub(crate) fn new(config: TeamConfig, world: W, members: Vec<PhaseController>, bus: MessageBus) -> Self {
        Self { config, world, members, bus, tick: Tick::ZERO }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the world reports completion or `config.total_ticks` is
    /// reached, then save every member's ledger.
    pub fn run<O: TeamObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        let start = self.tick;
        let mut completed = self.world.is_complete();
        while !completed && self.tick.0 < self.config.total_ticks {
            self.advance(observer);
            completed = self.world.is_complete();
        }

        for member in &mut self.members {
            member.persist()?;
        }

        let summary = RunSummary { ticks: self.tick.since(start), completed };
        tracing::info!(ticks = summary.ticks, completed, final_tick = %self.tick, "team run finished");
        observer.on_run_end(&summary);
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position, ignoring the deadline
    /// and completion.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: TeamObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.advance(observer);
        }
        Ok(())
    }

    /// The next tick to be processed.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Members in ascending name order.
    pub fn members(&self) -> &[PhaseController] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&PhaseController> {
        self.members
            .binary_search_by(|m| m.name().as_str().cmp(name))
            .ok()
            .map(|i| &self.members[i])
    }

    pub fn bus(&self) -> &MessageBus {
        &self.bus
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn advance<O: TeamObserver>(&mut self, observer: &mut O) {
        let now = self.tick;
        observer.on_tick_start(now);
        let acted = self.process_tick(now, observer);
        observer.on_tick_end(now, acted);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.members);
        }
        self.tick = now.next();
    }

    fn process_tick<O: TeamObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        // ── Phase 1: collect views and inboxes (sequential) ───────────────
        //
        // Every view is taken before anyone acts, so no member sees another
        // member's move from the same tick.
        let world = &self.world;
        let bus = &mut self.bus;
        let inputs: Vec<(WorldView, Vec<Envelope>)> = self
            .members
            .iter()
            .map(|m| (world.view_for(m.name(), now), bus.take_inbox(m.name())))
            .collect();

        // ── Phase 2: step every controller ────────────────────────────────
        let outputs = self.compute_steps(inputs);

        // ── Phase 3: apply in ascending name order ────────────────────────
        let mut acted = 0;
        for (member, output) in self.members.iter().zip(outputs) {
            observer.on_agent_step(now, member, &output);
            if let Some(action) = &output.action {
                self.world.apply(member.name(), action);
                acted += 1;
            }
            for envelope in output.messages {
                self.bus.publish(envelope);
            }
        }

        // ── Phase 4: deliver for next tick ────────────────────────────────
        let sent = self.bus.in_flight();
        self.bus.end_tick();
        tracing::trace!(tick = %now, acted, sent, "tick processed");
        acted
    }

    /// Step every member on its collected input.
    ///
    /// With the `parallel` Cargo feature the controllers run on Rayon's
    /// thread pool; outputs keep member order either way.
    fn compute_steps(&mut self, inputs: Vec<(WorldView, Vec<Envelope>)>) -> Vec<StepOutput> {
        #[cfg(not(feature = "parallel"))]
        {
            self.members
                .iter_mut()
                .zip(inputs)
                .map(|(member, (view, inbox))| member.step(&view, inbox))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.members
                .par_iter_mut()
                .zip(inputs.into_par_iter())
                .map(|(member, (view, inbox))| member.step(&view, inbox))
                .collect()
        }
    }
}

impl<W: World> std::fmt::Debug for Team<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&AgentName> = self.members.iter().map(PhaseController::name).collect();
        f.debug_struct("Team")
            .field("tick", &self.tick)
            .field("members", &names)
            .finish_non_exhaustive()
    }
}
