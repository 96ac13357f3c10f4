use bw_belief::BeliefError;
use bw_core::Location;
use bw_trust::TrustError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Trust(#[from] TrustError),

    #[error(transparent)]
    Belief(#[from] BeliefError),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Why a route could not be planned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("route needs at least one waypoint")]
    NoWaypoints,

    #[error("no route to {0}")]
    Unreachable(Location),
}

pub type NavResult<T> = Result<T, NavError>;
