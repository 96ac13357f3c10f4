//! Fluent builder for constructing a [`Team`].

use std::collections::BTreeSet;

use bw_agent::{ControllerBuilder, PhaseController};
use bw_trust::JsonFileStore;

use crate::{MessageBus, SimError, SimResult, Team, TeamConfig, World};

/// Fluent builder for [`Team<W>`].
///
/// Members listed in [`TeamConfig::members`] are built from their archetype
/// with the shared [`AgentConfig`](bw_agent::AgentConfig) and seed.  Their
/// ledgers live in `ledger_dir` when one is configured, in memory otherwise.
/// Controllers assembled by hand join through [`member`](Self::member).
///
/// # Example
///
/// ```rust,ignore
/// let config = TeamConfig::from_file(Path::new("team.toml"))?;
/// let mut team = TeamBuilder::new(config, arena).build()?;
/// let summary = team.run(&mut NoopObserver)?;
/// ```
pub struct TeamBuilder<W: World> {
    config: TeamConfig,
    world: W,
    extra: Vec<PhaseController>,
}

impl<W: World> TeamBuilder<W> {
    pub fn new(config: TeamConfig, world: W) -> Self {
        Self { config, world, extra: Vec::new() }
    }

    /// Add a controller built outside the roster.
    pub fn member(mut self, controller: PhaseController) -> Self {
        self.extra.push(controller);
        self
    }

    /// Validate the roster, build every controller and return a ready-to-run
    /// [`Team`].
    pub fn build(self) -> SimResult<Team<W>> {
        self.config.validate()?;

        let mut members = Vec::with_capacity(self.config.members.len() + self.extra.len());
        for entry in &self.config.members {
            let mut builder = ControllerBuilder::new(entry.name.clone())
                .archetype(entry.archetype)
                .config(self.config.agent.clone())
                .seed(self.config.seed);
            if let Some(dir) = &self.config.ledger_dir {
                builder = builder.store(JsonFileStore::new(dir));
            }
            members.push(builder.build()?);
        }
        members.extend(self.extra);

        if members.is_empty() {
            return Err(SimError::Config("team has no members".into()));
        }
        let mut seen = BTreeSet::new();
        for m in &members {
            if !seen.insert(m.name().clone()) {
                return Err(SimError::DuplicateMember(m.name().clone()));
            }
        }

        // Ascending name order is the apply order.
        members.sort_by(|a, b| a.name().cmp(b.name()));
        let bus = MessageBus::new(members.iter().map(|m| m.name().clone()));

        tracing::info!(
            members = members.len(),
            total_ticks = self.config.total_ticks,
            seed = self.config.seed,
            "team assembled"
        );
        Ok(Team::new(self.config, self.world, members, bus))
    }
}
