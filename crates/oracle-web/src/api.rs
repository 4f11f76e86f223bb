//! API Client

use serde::{Deserialize, Serialize};

/// Display emphasis of a prediction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// CSS class tinting the prediction text
    pub const fn class(self) -> &'static str {
        match self {
            Self::Positive => "sentiment-positive",
            Self::Negative => "sentiment-negative",
            Self::Neutral => "sentiment-neutral",
        }
    }
}

/// Prediction as rendered
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Prediction {
    pub text: String,
    pub sentiment: Sentiment,
    pub cta_url: String,
    pub cta_label: String,
    #[serde(default)]
    pub source_query: Option<String>,
}

/// Server-side interaction state
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OracleState {
    pub busy: bool,
    pub current: Option<Prediction>,
    pub history: Vec<Prediction>,
    pub shake_count: u64,
}

/// Reply to a shake
#[derive(Clone, Debug, Deserialize)]
pub struct ShakeReply {
    pub accepted: bool,
    pub state: OracleState,
    #[serde(default)]
    pub share_url: Option<String>,
}

#[derive(Serialize)]
struct ShakeRequest<'a> {
    query: &'a str,
}

/// Absolute URL for an API path; reqwest on WASM rejects relative URLs
fn endpoint(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());

    format!("{origin}{path}")
}

async fn read_error(response: reqwest::Response) -> String {
    let data: serde_json::Value = response.json().await.unwrap_or_default();
    data["error"].as_str().unwrap_or("The Oracle is silent").to_string()
}

/// Preset question bubbles
pub async fn fetch_queries() -> Result<Vec<String>, String> {
    let response = reqwest::get(endpoint("/api/queries"))
        .await
        .map_err(|e| e.to_string())?;

    response.json().await.map_err(|e| e.to_string())
}

/// Current interaction state
pub async fn fetch_state() -> Result<OracleState, String> {
    let response = reqwest::get(endpoint("/api/state"))
        .await
        .map_err(|e| e.to_string())?;

    response.json().await.map_err(|e| e.to_string())
}

/// Shake the ball with a question
pub async fn shake(query: &str) -> Result<ShakeReply, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(endpoint("/api/shake"))
        .json(&ShakeRequest { query })
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(read_error(response).await)
    }
}

/// Dismiss the displayed prediction
pub async fn close_prediction() -> Result<OracleState, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(endpoint("/api/prediction/close"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    response.json().await.map_err(|e| e.to_string())
}
