//! crystal-ball HTTP Server
//!
//! Axum-based server hosting the oracle: a small REST API around one
//! interaction controller plus the WASM frontend as static files.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use oracle_core::{
    ControllerBuilder, JsonFileStore, KeyValueStore, LlmProvider, MemoryStore,
    PredictionGenerator, PriceFeed, TracingNotifier, provider::GenerationOptions,
};
use oracle_runtime::OllamaProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crystal_ball::{CoinGeckoFeed, LocalGenerator, RemoteGenerator, StaticPriceFeed};

use crate::config::{FeedKind, OracleConfig, StrategyKind};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = OracleConfig::from_env()?;

    // Shake counter persistence
    let store: Arc<dyn KeyValueStore> = match &config.counter_path {
        Some(path) => {
            tracing::info!("✓ Shake counter stored in {}", path.display());
            Arc::new(JsonFileStore::new(path.clone()))
        }
        None => {
            tracing::warn!("⚠ COUNTER_PATH not set - shake counter resets on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Price feed
    let price_feed: Arc<dyn PriceFeed> = match config.price_feed {
        FeedKind::CoinGecko => Arc::new(
            config
                .price_api_url
                .as_deref()
                .map_or_else(CoinGeckoFeed::from_env, CoinGeckoFeed::new),
        ),
        FeedKind::Static => Arc::new(StaticPriceFeed::new()),
    };

    // Prediction strategy
    let (generator, provider): (Arc<dyn PredictionGenerator>, Option<Arc<dyn LlmProvider>>) =
        match config.strategy {
            StrategyKind::Local => (
                Arc::new(
                    LocalGenerator::new()
                        .with_deflection_probability(config.deflection_probability),
                ),
                None,
            ),
            StrategyKind::Remote => {
                let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_env());

                // Verify Ollama connection
                if provider.health_check().await {
                    tracing::info!("✓ Connected to Ollama ({})", config.model);
                } else {
                    tracing::warn!("⚠ Ollama not available - the oracle will be rebooting");
                    tracing::warn!("  Make sure Ollama is running: ollama serve");
                }

                let generator = RemoteGenerator::new(
                    provider.clone(),
                    GenerationOptions::for_model(config.model.clone()),
                );
                (Arc::new(generator), Some(provider))
            }
        };

    tracing::info!(
        "Oracle: {} strategy, {} feed, asset '{}'",
        generator.name(),
        price_feed.name(),
        config.asset
    );

    let controller = ControllerBuilder::new()
        .price_feed(price_feed)
        .generator(generator)
        .store(store)
        .notifier(Arc::new(TracingNotifier))
        .asset(config.asset.clone())
        .shake_delay(config.shake_delay)
        .build()?;

    // Build application state
    let state = AppState {
        controller: Arc::new(controller),
        provider,
        strategy: config.strategy,
        public_url: config.public_url.as_str().into(),
    };

    let app = routes::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🔮 crystal-ball server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                - Health check");
    tracing::info!("  GET  /api/queries           - Preset questions");
    tracing::info!("  GET  /api/state             - Current interaction state");
    tracing::info!("  POST /api/shake             - Ask the oracle");
    tracing::info!("  POST /api/prediction/close  - Dismiss the prediction");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
