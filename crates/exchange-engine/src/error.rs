//! Operational errors.
//!
//! Access denials are not errors; they come back as
//! [`AccessResult`](crate::types::AccessResult) values.

use thiserror::Error;

/// Errors raised by configuration loading, publishing, history views and the
/// shared handle
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("failed to read configuration {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("encounter draft rejected: {0}")]
    InvalidDraft(String),

    #[error("unknown encounter: {0}")]
    UnknownEncounter(String),

    #[error("no history access granted for patient {0}")]
    NoGrant(String),

    #[error("exchange state lock poisoned")]
    LockPoisoned,
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
