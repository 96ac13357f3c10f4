use bw_agent::AgentError;
use bw_core::AgentName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("team configuration error: {0}")]
    Config(String),

    #[error("duplicate team member {0}")]
    DuplicateMember(AgentName),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
