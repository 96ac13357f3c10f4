//! Trust engine tuning.

use std::path::Path;

use bw_core::{Score, TrustRecord};
use serde::{Deserialize, Serialize};

use crate::{TrustError, TrustResult};

/// Thresholds and windows of the trust engine.
///
/// ```toml
/// reliability_threshold = 0.6
/// competence_threshold  = 0.6
/// search_duration_ticks = 5
/// gossip_sample_ratio   = 0.8
/// sighting_memory       = 256
///
/// [prior]
/// reliability = [1, 1]
/// competence  = [1, 1]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Minimum reliability ratio for any message to be believed.
    pub reliability_threshold: f64,
    /// Minimum competence ratio for capability claims.
    pub competence_threshold: f64,
    /// Ticks a room sweep takes at least.
    pub search_duration_ticks: u64,
    /// A gossiped score is ignored when its sample size is below this
    /// fraction of our own accurate count.
    pub gossip_sample_ratio: f64,
    /// Goal-block sightings kept for corroborating pick-ups; the oldest is
    /// forgotten first.
    pub sighting_memory: usize,
    /// Record given to a teammate the ledger has never seen.
    pub prior: TrustRecord,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            reliability_threshold: 0.6,
            competence_threshold: 0.6,
            search_duration_ticks: 5,
            gossip_sample_ratio: 0.8,
            sighting_memory: 256,
            prior: TrustRecord::new(Score::new(1, 1), Score::new(1, 1)),
        }
    }
}

impl TrustConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> TrustResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> TrustResult<Self> {
        let config: TrustConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TrustResult<()> {
        for (name, v) in [
            ("reliability_threshold", self.reliability_threshold),
            ("competence_threshold", self.competence_threshold),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(TrustError::Config(format!("{name} must be within [0, 1], got {v}")));
            }
        }
        if !(self.gossip_sample_ratio >= 0.0) {
            return Err(TrustError::Config(format!(
                "gossip_sample_ratio must be non-negative, got {}",
                self.gossip_sample_ratio
            )));
        }
        if self.sighting_memory == 0 {
            return Err(TrustError::Config("sighting_memory must be at least 1".into()));
        }
        Ok(())
    }
}
