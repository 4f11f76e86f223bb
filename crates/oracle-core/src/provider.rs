//! Generative Backends
//!
//! The remote prediction strategy consults whichever backend it is handed
//! through [`LlmProvider`]. Backends are untrusted: the strategy validates
//! everything they return.
//!
//! ```rust,ignore
//! let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_env());
//! let reply = provider.complete(&messages, &GenerationOptions::for_model("llama3.2")).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Sampling settings for one consultation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Backend model identifier (e.g., "llama3.2")
    pub model: String,

    /// High by default: the oracle is supposed to be colourful
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on reply length; predictions are one or two sentences
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Ask the backend to constrain its reply to a JSON object
    #[serde(default)]
    pub json_reply: bool,
}

const fn default_temperature() -> f32 { 0.9 }
const fn default_max_tokens() -> u32 { 256 }
const fn default_top_p() -> f32 { 0.95 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::for_model("llama3.2")
    }
}

impl GenerationOptions {
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            json_reply: false,
        }
    }

    #[must_use]
    pub const fn json_reply(mut self) -> Self {
        self.json_reply = true;
        self
    }
}

/// Raw backend reply, before any parsing
#[derive(Clone, Debug)]
pub struct Completion {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub const fn total(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// A generative-text backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Whether the backend answers at all; never errors
    async fn health_check(&self) -> bool;

    /// Send `messages` and return the raw reply
    async fn complete(&self, messages: &[Message], options: &GenerationOptions)
        -> Result<Completion>;
}
