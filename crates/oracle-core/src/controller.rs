//! Shake Controller
//!
//! Sequences one shake cycle: guard, counter, price fetch, cosmetic delay,
//! generation, state update. Only one cycle runs at a time; requests that
//! arrive while a cycle is in flight are dropped, never queued. An accepted
//! cycle runs on a spawned task and completes even if its caller goes away.
//!
//! ```text
//!   Idle ──shake(q)──▶ Shaking ──price──▶ delay ──generate──▶ Idle
//!                         │                                   ▲
//!                         └──────── panic: congested ─────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{OracleError, Result};
use crate::oracle::{Cue, Notifier, PredictionGenerator, PriceFeed};
use crate::prediction::PredictionResult;
use crate::state::{InteractionSnapshot, InteractionState};
use crate::store::{KeyValueStore, PendingCount};

/// Asset whose price is fed to the generator
pub const DEFAULT_ASSET: &str = "solana";

/// Length of the shake animation
pub const DEFAULT_SHAKE_DELAY: Duration = Duration::from_millis(1500);

/// Controller configuration
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Asset identifier passed to the price feed
    pub asset_id: String,

    /// Unconditional delay between price fetch and generation
    pub shake_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            asset_id: DEFAULT_ASSET.into(),
            shake_delay: DEFAULT_SHAKE_DELAY,
        }
    }
}

/// What happened to a shake request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShakeOutcome {
    /// Cycle ran to completion; the result is current and in history
    Completed(PredictionResult),
    /// Cycle failed unexpectedly; the congested result is current
    Degraded(PredictionResult),
    /// Another cycle was in flight; nothing changed
    Dropped,
}

impl ShakeOutcome {
    pub const fn accepted(&self) -> bool {
        !matches!(self, Self::Dropped)
    }

    pub const fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            Self::Completed(p) | Self::Degraded(p) => Some(p),
            Self::Dropped => None,
        }
    }
}

/// Owner of the interaction state
pub struct InteractionController {
    shared: Arc<Shared>,
    notifier: Option<Arc<dyn Notifier>>,
}

/// Everything a detached cycle needs
struct Shared {
    price_feed: Arc<dyn PriceFeed>,
    generator: Arc<dyn PredictionGenerator>,
    config: ControllerConfig,
    state: Mutex<InteractionState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, InteractionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn show_congestion(&self) -> ShakeOutcome {
        let fallback = PredictionResult::network_congested();
        self.lock().current = Some(fallback.clone());
        ShakeOutcome::Degraded(fallback)
    }

    /// Persist the count, predict, publish. Runs on its own task so a
    /// dropped caller cannot leave the cycle half done.
    async fn run(self: Arc<Self>, query: String, pending: PendingCount) -> ShakeOutcome {
        let _release = BusyGuard {
            shared: Arc::clone(&self),
        };

        if let Err(e) = tokio::task::spawn_blocking(move || pending.persist()).await {
            tracing::warn!("Shake counter write did not finish: {}", e);
        }

        let predict = tokio::spawn(Arc::clone(&self).predict(query.clone()));
        let outcome = match predict.await {
            Ok(result) => {
                let mut state = self.lock();
                state.current = Some(result.clone());
                state.history.append(result.clone());
                ShakeOutcome::Completed(result)
            }
            Err(e) => {
                tracing::error!(
                    query = %query,
                    panicked = e.is_panic(),
                    "Shake cycle failed, showing congestion fallback"
                );
                self.show_congestion()
            }
        };

        tracing::debug!(accepted = outcome.accepted(), "Shake finished");
        outcome
    }

    async fn predict(self: Arc<Self>, query: String) -> PredictionResult {
        let price = self.price_feed.fetch_price(&self.config.asset_id).await;
        tracing::debug!(asset = %self.config.asset_id, %price, "Price context");

        tokio::time::sleep(self.config.shake_delay).await;

        self.generator.generate(&query, &price).await
    }
}

impl InteractionController {
    /// Create a controller, restoring the shake counter from `store`
    pub fn new(
        price_feed: Arc<dyn PriceFeed>,
        generator: Arc<dyn PredictionGenerator>,
        store: Arc<dyn KeyValueStore>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                price_feed,
                generator,
                config,
                state: Mutex::new(InteractionState::restore(store)),
            }),
            notifier: None,
        }
    }

    /// Attach a fire-and-forget notifier
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Current state for rendering
    pub fn snapshot(&self) -> InteractionSnapshot {
        self.shared.lock().snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.shared.lock().busy
    }

    /// Dismiss the displayed prediction; history and busy are untouched
    pub fn close_prediction(&self) {
        self.shared.lock().current = None;
    }

    /// Run one shake cycle for `query`
    ///
    /// Once accepted, the cycle finishes even if this future is dropped.
    pub async fn shake(&self, query: &str) -> ShakeOutcome {
        let pending = {
            let mut state = self.shared.lock();
            if state.busy {
                tracing::debug!(query, "Shake dropped, cycle already in flight");
                return ShakeOutcome::Dropped;
            }
            state.busy = true;
            state.current = None;
            state.counter.record_visit()
        };

        if let Some(notifier) = &self.notifier {
            notifier.notify(Cue::Shake);
        }

        tracing::info!(
            query,
            count = pending.count(),
            generator = self.shared.generator.name(),
            "Shake started"
        );

        let cycle = tokio::spawn(Arc::clone(&self.shared).run(query.to_owned(), pending));
        match cycle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(query, "Shake task lost: {}", e);
                self.shared.show_congestion()
            }
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.shared.config
    }
}

/// Clears `busy` when the cycle ends, including by unwinding
struct BusyGuard {
    shared: Arc<Shared>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.shared.lock().busy = false;
    }
}

/// Builder for [`InteractionController`]
#[derive(Default)]
pub struct ControllerBuilder {
    price_feed: Option<Arc<dyn PriceFeed>>,
    generator: Option<Arc<dyn PredictionGenerator>>,
    store: Option<Arc<dyn KeyValueStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    config: ControllerConfig,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn price_feed(mut self, feed: Arc<dyn PriceFeed>) -> Self {
        self.price_feed = Some(feed);
        self
    }

    #[must_use]
    pub fn generator(mut self, generator: Arc<dyn PredictionGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn asset(mut self, asset_id: impl Into<String>) -> Self {
        self.config.asset_id = asset_id.into();
        self
    }

    #[must_use]
    pub const fn shake_delay(mut self, delay: Duration) -> Self {
        self.config.shake_delay = delay;
        self
    }

    pub fn build(self) -> Result<InteractionController> {
        let price_feed = self.price_feed
            .ok_or_else(|| OracleError::Config("Price feed is required".into()))?;
        let generator = self.generator
            .ok_or_else(|| OracleError::Config("Prediction generator is required".into()))?;
        let store = self.store
            .ok_or_else(|| OracleError::Config("Counter store is required".into()))?;
        if self.config.asset_id.trim().is_empty() {
            return Err(OracleError::Config("Asset id must not be empty".into()));
        }

        let controller = InteractionController::new(price_feed, generator, store, self.config);
        Ok(match self.notifier {
            Some(notifier) => controller.with_notifier(notifier),
            None => controller,
        })
    }
}
