//! Team roster and run settings.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bw_agent::{AgentConfig, Archetype};
use bw_core::AgentName;
use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberConfig {
    pub name: AgentName,
    #[serde(default)]
    pub archetype: Archetype,
}

impl MemberConfig {
    pub fn new(name: impl Into<AgentName>, archetype: Archetype) -> Self {
        Self { name: name.into(), archetype }
    }
}

/// Configuration of one team run.
///
/// ```toml
/// total_ticks           = 1000
/// seed                  = 42
/// ledger_dir            = "ledgers"
/// output_interval_ticks = 10
///
/// [[members]]
/// name      = "alice"
/// archetype = "strong"
///
/// [[members]]
/// name      = "bob"
/// archetype = "liar"
///
/// [agent.trust]
/// reliability_threshold = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Deadline; the run stops after this many ticks even if unfinished.
    pub total_ticks: u64,
    /// Global seed every member's RNG stream is derived from.
    pub seed: u64,
    /// Where reputation ledgers persist between runs.  `None` keeps them in
    /// memory for the duration of the run.
    pub ledger_dir: Option<PathBuf>,
    /// Observer snapshot cadence in ticks; `0` disables snapshots.
    pub output_interval_ticks: u64,
    pub members: Vec<MemberConfig>,
    /// Shared controller tuning.
    pub agent: AgentConfig,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            total_ticks: 1000,
            seed: 42,
            ledger_dir: None,
            output_interval_ticks: 10,
            members: Vec::new(),
            agent: AgentConfig::default(),
        }
    }
}

impl TeamConfig {
    pub fn from_file(path: &Path) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> SimResult<Self> {
        let config: TeamConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.total_ticks == 0 {
            return Err(SimError::Config("total_ticks must be at least 1".into()));
        }
        let mut seen = BTreeSet::new();
        for member in &self.members {
            if member.name.as_str().is_empty() {
                return Err(SimError::Config("member name must not be empty".into()));
            }
            if !seen.insert(&member.name) {
                return Err(SimError::DuplicateMember(member.name.clone()));
            }
        }
        self.agent.validate()?;
        Ok(())
    }
}
