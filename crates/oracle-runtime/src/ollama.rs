//! Ollama Backend
//!
//! Local inference for the remote oracle strategy. A slow or absent Ollama
//! must never hang a shake, so every request runs under a client timeout.

use std::time::Duration;

use async_trait::async_trait;
use oracle_core::{
    error::{OracleError, Result},
    message::{Message, Role},
    provider::{Completion, GenerationOptions, LlmProvider, TokenUsage},
};
use ollama_rs::{
    generation::{
        chat::{ChatMessage, ChatMessageResponse, MessageRole, request::ChatMessageRequest},
        parameters::FormatType,
    },
    models::ModelOptions as OllamaOptions,
    Ollama,
};

const DEFAULT_HOST: &str = "http://localhost";
const DEFAULT_PORT: u16 = 11434;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where Ollama lives and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OllamaConfig {
    /// `OLLAMA_HOST`, `OLLAMA_PORT`, `OLLAMA_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unparsable values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("OLLAMA_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim_end_matches('/').to_string();
        }

        match lookup("OLLAMA_PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => config.port = port,
            Some(Err(e)) => tracing::warn!("Ignoring OLLAMA_PORT: {}", e),
            None => {}
        }

        match lookup("OLLAMA_TIMEOUT_SECS").map(|t| t.trim().parse::<u64>()) {
            Some(Ok(secs)) => config.timeout = Duration::from_secs(secs),
            Some(Err(e)) => tracing::warn!("Ignoring OLLAMA_TIMEOUT_SECS: {}", e),
            None => {}
        }

        config
    }

    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `LlmProvider` backed by an Ollama server
pub struct OllamaProvider {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaProvider {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::from_config(OllamaConfig {
            host: host.into(),
            port,
            ..OllamaConfig::default()
        })
    }

    pub fn from_config(config: OllamaConfig) -> Self {
        let client = match reqwest::Client::builder().timeout(config.timeout).build() {
            Ok(http) => Ollama::new_with_client(&config.host, config.port, http),
            Err(e) => {
                tracing::warn!("Ollama client without timeout: {}", e);
                Ollama::new(&config.host, config.port)
            }
        };

        tracing::debug!(url = %config.base_url(), "Ollama backend configured");
        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::from_config(OllamaConfig::from_env())
    }

    pub const fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

fn to_chat_message(message: &Message) -> ChatMessage {
    let role = match message.role {
        Role::System => MessageRole::System,
        Role::User => MessageRole::User,
        Role::Assistant => MessageRole::Assistant,
    };
    ChatMessage::new(role, message.content.clone())
}

fn model_options(options: &GenerationOptions) -> OllamaOptions {
    OllamaOptions::default()
        .temperature(options.temperature)
        .top_p(options.top_p)
        .num_predict(i32::try_from(options.max_tokens).unwrap_or(i32::MAX))
}

fn chat_request(messages: &[Message], options: &GenerationOptions) -> ChatMessageRequest {
    let request = ChatMessageRequest::new(
        options.model.clone(),
        messages.iter().map(to_chat_message).collect(),
    )
    .options(model_options(options));

    if options.json_reply {
        request.format(FormatType::Json)
    } else {
        request
    }
}

fn completion_from(response: ChatMessageResponse, model: &str) -> Completion {
    let usage = response.final_data.as_ref().map(|data| TokenUsage {
        prompt_tokens: u32::try_from(data.prompt_eval_count).unwrap_or(u32::MAX),
        completion_tokens: u32::try_from(data.eval_count).unwrap_or(u32::MAX),
    });

    Completion {
        content: response.message.content,
        model: model.to_string(),
        usage,
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn health_check(&self) -> bool {
        match self.client.list_local_models().await {
            Ok(models) => {
                tracing::debug!(count = models.len(), "Ollama reachable");
                true
            }
            Err(e) => {
                tracing::warn!("Ollama unreachable at {}: {}", self.config.base_url(), e);
                false
            }
        }
    }

    async fn complete(&self, messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
        let request = chat_request(messages, options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| OracleError::ProviderUnavailable(e.to_string()))?;

        Ok(completion_from(response, &options.model))
    }
}
