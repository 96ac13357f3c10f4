//! Controller tuning.

use std::path::Path;

use bw_trust::TrustConfig;
use serde::{Deserialize, Serialize};

use crate::{AgentError, AgentResult};

/// Configuration of one [`PhaseController`](crate::PhaseController).
///
/// ```toml
/// door_approach_offset     = [0, 1]
/// sweep_offsets            = [[0, -2], [1, -2], [-2, -2]]
/// max_transitions_per_tick = 8
///
/// [trust]
/// reliability_threshold = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub trust: TrustConfig,
    /// Room sweep tour, relative to the tile in front of the door.  Sized
    /// for the fixed room dimensions of the arena.
    pub sweep_offsets: Vec<(i32, i32)>,
    /// Tile in front of a door, relative to the door (south of it).
    pub door_approach_offset: (i32, i32),
    /// Bookkeeping transitions allowed within one tick before giving up.
    pub max_transitions_per_tick: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            trust: TrustConfig::default(),
            sweep_offsets: vec![(0, -2), (1, -2), (-2, -2)],
            door_approach_offset: (0, 1),
            max_transitions_per_tick: 8,
        }
    }
}

impl AgentConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> AgentResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> AgentResult<Self> {
        let config: AgentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AgentResult<()> {
        if self.sweep_offsets.is_empty() {
            return Err(AgentError::Config("sweep_offsets must not be empty".into()));
        }
        if self.max_transitions_per_tick == 0 {
            return Err(AgentError::Config("max_transitions_per_tick must be at least 1".into()));
        }
        self.trust.validate()?;
        Ok(())
    }
}
