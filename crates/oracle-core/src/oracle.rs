//! Oracle Capabilities
//!
//! Seams the shake controller is assembled from. Both data-source traits
//! are infallible by contract: implementations absorb their own failures
//! and return a degraded-but-valid value.

use async_trait::async_trait;

use crate::prediction::PredictionResult;

/// Price quote client (Strategy pattern)
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Display-ready price for an asset, or a fixed fallback string
    async fn fetch_price(&self, asset_id: &str) -> String;

    /// Feed name
    fn name(&self) -> &str;
}

/// Prediction strategy (remote backend, local table, test doubles)
#[async_trait]
pub trait PredictionGenerator: Send + Sync {
    /// Produce a prediction for a question given the current price
    async fn generate(&self, query: &str, price_context: &str) -> PredictionResult;

    /// Strategy name
    fn name(&self) -> &str;
}

/// Cue fired when a shake cycle starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Shake,
}

/// Fire-and-forget side effects (sound, logging)
///
/// Called synchronously by the controller; implementations must not block
/// and have nowhere to report failure.
pub trait Notifier: Send + Sync {
    fn notify(&self, cue: Cue);
}

/// Notifier that records the cue in the trace log
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, cue: Cue) {
        tracing::debug!(?cue, "Cue fired");
    }
}
