//! Error Types for the Crystal Ball

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BallError>;

/// Failures inside price feeds and generators
///
/// These never cross the `PriceFeed`/`PredictionGenerator` boundary; they are
/// logged and replaced by fallback values there.
#[derive(Error, Debug)]
pub enum BallError {
    #[error("Price API returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid price {0}")]
    InvalidPrice(String),

    #[error("Backend error: {0}")]
    Backend(#[from] oracle_core::OracleError),

    #[error("Unparsable prediction: {0}")]
    Unparsable(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
