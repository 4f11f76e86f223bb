//! Prediction Strategies

mod local;
mod remote;

pub use local::{
    CannedPrediction, DEFAULT_DEFLECTION_PROBABILITY, LONG_QUERY_CHARS, LocalGenerator, PREDICTIONS,
};
pub use remote::{MUMBLING, RemoteGenerator, classify_sentiment};
