//! HTTP Handlers

use axum::{Json, extract::State, http::StatusCode};
use crystal_ball::{PRESET_QUERIES, share::share_url};
use oracle_core::{InteractionSnapshot, ShakeOutcome};
use serde::{Deserialize, Serialize};

use crate::config::StrategyKind;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub strategy: &'static str,
    /// `None` when no generative backend is configured
    pub backend_connected: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ShakeRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ShakeResponse {
    /// False when another shake was in flight and this one was dropped
    pub accepted: bool,
    pub state: InteractionSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_connected = match &state.provider {
        Some(provider) => Some(provider.health_check().await),
        None => None,
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        strategy: match state.strategy {
            StrategyKind::Local => "local",
            StrategyKind::Remote => "remote",
        },
        backend_connected,
    })
}

/// Current interaction state
pub async fn get_state(State(state): State<AppState>) -> Json<InteractionSnapshot> {
    Json(state.controller.snapshot())
}

/// Preset question bubbles
pub async fn list_queries() -> Json<Vec<&'static str>> {
    Json(PRESET_QUERIES.to_vec())
}

/// Shake the ball with a question
pub async fn shake(
    State(state): State<AppState>,
    Json(payload): Json<ShakeRequest>,
) -> Result<Json<ShakeResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Ask the Oracle something first".into(),
                code: "EMPTY_QUERY".into(),
            }),
        ));
    }

    let outcome = state.controller.shake(&payload.query).await;

    let share_url = match &outcome {
        ShakeOutcome::Completed(prediction) => Some(share_url(prediction, &state.public_url)),
        ShakeOutcome::Degraded(_) | ShakeOutcome::Dropped => None,
    };

    Ok(Json(ShakeResponse {
        accepted: outcome.accepted(),
        state: state.controller.snapshot(),
        share_url,
    }))
}

/// Dismiss the displayed prediction
pub async fn close_prediction(State(state): State<AppState>) -> Json<InteractionSnapshot> {
    state.controller.close_prediction();
    Json(state.controller.snapshot())
}
