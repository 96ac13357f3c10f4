use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrustError {
    #[error("trust configuration error: {0}")]
    Config(String),

    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type TrustResult<T> = Result<T, TrustError>;
