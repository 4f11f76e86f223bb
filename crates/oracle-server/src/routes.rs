//! Router

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{close_prediction, get_state, health_check, list_queries, shake};
use crate::state::AppState;

/// Build the application router; unmatched paths fall through to the frontend
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/queries", get(list_queries))

        // Oracle API
        .route("/api/state", get(get_state))
        .route("/api/shake", post(shake))
        .route("/api/prediction/close", post(close_prediction))

        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use crystal_ball::{
        LocalGenerator, StaticPriceFeed,
        entropy::{FixedClock, FixedRoll},
    };
    use oracle_core::{ControllerBuilder, InteractionSnapshot, MemoryStore};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StrategyKind;

    fn test_app() -> Router {
        let generator = LocalGenerator::new()
            .with_clock(Arc::new(FixedClock::from_millis(1_700_000_000_000).unwrap()))
            .with_random(Arc::new(FixedRoll(0.9)));

        let controller = ControllerBuilder::new()
            .price_feed(Arc::new(StaticPriceFeed::new()))
            .generator(Arc::new(generator))
            .store(Arc::new(MemoryStore::new()))
            .shake_delay(Duration::ZERO)
            .build()
            .unwrap();

        let state = AppState {
            controller: Arc::new(controller),
            provider: None,
            strategy: StrategyKind::Local,
            public_url: "http://localhost:3000".into(),
        };

        router(state, Path::new("static"))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["strategy"], "local");
        assert!(body["backend_connected"].is_null());
    }

    #[tokio::test]
    async fn test_presets() {
        let response = test_app()
            .oneshot(Request::get("/api/queries").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(10));
        assert_eq!(body[0], "Will SOL flip ETH by 2026?");
    }

    #[tokio::test]
    async fn test_shake_then_close() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json("/api/shake", &json!({ "query": "Will SOL flip ETH by 2026?" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["accepted"], true);
        assert!(body["share_url"].as_str().unwrap().starts_with("https://twitter.com/intent/tweet"));

        let snapshot: InteractionSnapshot = serde_json::from_value(body["state"].clone()).unwrap();
        assert!(!snapshot.busy);
        assert_eq!(snapshot.shake_count, 1);
        assert_eq!(snapshot.history.len(), 1);
        let current = snapshot.current.unwrap();
        assert_eq!(current.source_query.as_deref(), Some("Will SOL flip ETH by 2026?"));
        assert_eq!(current.cta_url, "https://kalshi.com/");

        let response = app
            .clone()
            .oneshot(Request::post("/api/prediction/close").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let closed: InteractionSnapshot = serde_json::from_value(json_body(response).await).unwrap();
        assert!(closed.current.is_none());
        assert_eq!(closed.history.len(), 1);

        let response = app
            .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let state: InteractionSnapshot = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(state, closed);
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json("/api/shake", &json!({ "query": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "EMPTY_QUERY");

        // nothing was counted
        let response = app
            .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let state: InteractionSnapshot = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(state.shake_count, 0);
    }
}
