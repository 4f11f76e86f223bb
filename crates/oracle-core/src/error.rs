//! Error Types
//!
//! None of these reach the presentation layer: the price feed, the
//! generators and the controller all degrade to valid results instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OracleError>;

#[derive(Error, Debug)]
pub enum OracleError {
    /// Backend could not be reached or refused the request
    #[error("Backend unavailable: {0}")]
    ProviderUnavailable(String),

    /// Counter store read or write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Controller assembled without a required collaborator
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_convert() {
        let err: OracleError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
