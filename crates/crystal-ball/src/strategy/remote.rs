//! Remote Strategy
//!
//! Asks a generative backend for `{"text", "linkType"}` and parses the reply
//! leniently: shape deviations are defaulted, anything worse becomes the
//! "oracle rebooting" result.

use std::sync::Arc;

use async_trait::async_trait;
use oracle_core::{
    Destination, LlmProvider, Message, PredictionGenerator, PredictionResult, Sentiment,
    provider::GenerationOptions,
};
use serde_json::Value;

use crate::ORACLE_PERSONA_PROMPT;
use crate::error::{BallError, Result};

/// Substituted when the backend reply has no usable `text`
pub const MUMBLING: &str = "The spirits are mumbling. Try again.";

const BEARISH_CUES: [&str; 12] = [
    "no", "not", "never", "drop", "drops", "dump", "bear", "bearish", "crash", "rekt", "down", "red",
];

const BULLISH_CUES: [&str; 12] = [
    "yes", "moon", "pump", "bull", "bullish", "up", "green", "rally", "parabolic", "lambo", "100x", "wagmi",
];

/// Prediction generator backed by an `LlmProvider`
pub struct RemoteGenerator {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
    persona: String,
}

impl RemoteGenerator {
    /// Replies are always requested as JSON, whatever `options` says
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self {
            provider,
            options: options.json_reply(),
            persona: ORACLE_PERSONA_PROMPT.into(),
        }
    }

    /// Override the persona instruction
    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    fn build_messages(&self, query: &str, price_context: &str) -> Vec<Message> {
        vec![
            Message::system(self.persona.clone()),
            Message::user(format!(
                "Context: Current Solana (SOL) price is {price_context}.\n\
                 User question: \"{query}\"\n\n\
                 Answer with the prediction JSON."
            )),
        ]
    }

    async fn consult(&self, query: &str, price_context: &str) -> Result<PredictionResult> {
        let messages = self.build_messages(query, price_context);
        let completion = self.provider.complete(&messages, &self.options).await?;

        tracing::debug!(
            backend = self.provider.name(),
            model = %completion.model,
            tokens = completion.usage.map(|u| u.total()),
            "Backend replied"
        );
        parse_reply(&completion.content, query)
    }
}

#[async_trait]
impl PredictionGenerator for RemoteGenerator {
    async fn generate(&self, query: &str, price_context: &str) -> PredictionResult {
        match self.consult(query, price_context).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Remote prediction failed, oracle offline: {}", e);
                PredictionResult::oracle_rebooting(query)
            }
        }
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Turn a backend reply into a result, defaulting missing or unknown fields
fn parse_reply(content: &str, query: &str) -> Result<PredictionResult> {
    let json = extract_json(content)
        .ok_or_else(|| BallError::Unparsable(preview(content)))?;
    let reply: Value = serde_json::from_str(json)?;

    let text = reply
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(MUMBLING);

    let destination = reply
        .get("linkType")
        .and_then(Value::as_str)
        .and_then(Destination::from_key)
        .unwrap_or(Destination::Solana);

    Ok(PredictionResult::new(text, classify_sentiment(text), destination, query))
}

/// Locate the JSON object inside prose or code fences
fn extract_json(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;

    if end <= start {
        return None;
    }

    Some(&content[start..=end])
}

fn preview(content: &str) -> String {
    content.chars().take(80).collect()
}

/// Rough sentiment of free prediction text
pub fn classify_sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if words.iter().any(|w| BEARISH_CUES.contains(w)) {
        Sentiment::Negative
    } else if words.iter().any(|w| BULLISH_CUES.contains(w)) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use oracle_core::{
        OracleError,
        provider::Completion,
    };

    use super::*;

    /// Provider double replaying one canned reply
    struct ScriptedProvider {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<Message>>,
        options: Mutex<Option<GenerationOptions>>,
    }

    impl ScriptedProvider {
        fn replying(content: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(content.into()),
                seen: Mutex::new(Vec::new()),
                options: Mutex::new(None),
            })
        }

        fn failing(error: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(error.into()),
                seen: Mutex::new(Vec::new()),
                options: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn health_check(&self) -> bool {
            self.reply.is_ok()
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> oracle_core::Result<Completion> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            *self.options.lock().unwrap() = Some(options.clone());
            match &self.reply {
                Ok(content) => Ok(Completion {
                    content: content.clone(),
                    model: options.model.clone(),
                    usage: None,
                }),
                Err(e) => Err(OracleError::ProviderUnavailable(e.clone())),
            }
        }
    }

    fn generator(provider: Arc<ScriptedProvider>) -> RemoteGenerator {
        RemoteGenerator::new(provider, GenerationOptions::default())
    }

    #[tokio::test]
    async fn test_well_formed_reply() {
        let provider = ScriptedProvider::replying(
            r#"{"text": "SOL to the moon by Friday 🚀", "linkType": "JUPITER"}"#,
        );
        let result = generator(provider.clone()).generate("Wen Lambo?", "$180").await;

        assert_eq!(result.text, "SOL to the moon by Friday 🚀");
        assert_eq!(result.destination(), Some(Destination::Jupiter));
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.source_query.as_deref(), Some("Wen Lambo?"));

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].content, ORACLE_PERSONA_PROMPT);
        assert!(seen[1].content.contains("$180"));
        assert!(seen[1].content.contains("\"Wen Lambo?\""));
    }

    #[tokio::test]
    async fn test_backend_is_asked_for_json() {
        let provider = ScriptedProvider::replying(r#"{"text": "Yes.", "linkType": "SOLANA"}"#);
        let generator = RemoteGenerator::new(provider.clone(), GenerationOptions::for_model("mistral"));
        generator.generate("Wen Lambo?", "$180").await;

        let sent = provider.options.lock().unwrap().clone().unwrap();
        assert!(sent.json_reply);
        assert_eq!(sent.model, "mistral");
    }

    #[tokio::test]
    async fn test_unknown_link_type_defaults_to_solana() {
        let provider = ScriptedProvider::replying(r#"{"text": "Maybe.", "linkType": "MOON"}"#);
        let result = generator(provider).generate("Is the Bull Run over?", "$180").await;

        assert_eq!(result.cta_url, "https://solana.com/");
        assert_eq!(result.cta_label, "Learn about Solana");
    }

    #[tokio::test]
    async fn test_missing_fields_are_defaulted() {
        let provider = ScriptedProvider::replying(r#"{"linkType": "kalshi"}"#);
        let result = generator(provider).generate("Who wins the US Election?", "$180").await;

        assert_eq!(result.text, MUMBLING);
        assert_eq!(result.destination(), Some(Destination::Kalshi));

        let provider = ScriptedProvider::replying(r#"{"text": 42, "linkType": null}"#);
        let result = generator(provider).generate("q", "$180").await;
        assert_eq!(result.text, MUMBLING);
        assert_eq!(result.destination(), Some(Destination::Solana));
    }

    #[tokio::test]
    async fn test_reply_wrapped_in_prose() {
        let provider = ScriptedProvider::replying(
            "Behold!\n```json\n{\"text\": \"Rain of liquidity tomorrow.\", \"linkType\": \"DFLOW\"}\n```",
        );
        let result = generator(provider).generate("Will it rain in London tomorrow?", "$180").await;

        assert_eq!(result.text, "Rain of liquidity tomorrow.");
        assert_eq!(result.destination(), Some(Destination::Dflow));
    }

    #[tokio::test]
    async fn test_transport_failure_reboots_oracle() {
        let provider = ScriptedProvider::failing("connection refused");
        let result = generator(provider).generate("Is my wallet safu?", "$180").await;

        assert_eq!(result, PredictionResult::oracle_rebooting("Is my wallet safu?"));
        assert_eq!(result.cta_url, "https://solana.com/status");
        assert_eq!(result.cta_label, "Check Network Status");
    }

    #[tokio::test]
    async fn test_unparsable_reply_reboots_oracle() {
        for reply in ["The spirits refuse to speak.", "{not json}", "} backwards {"] {
            let result = generator(ScriptedProvider::replying(reply)).generate("q", "$1").await;
            assert_eq!(result, PredictionResult::oracle_rebooting("q"));
        }
    }

    #[test]
    fn test_classify_sentiment() {
        assert_eq!(classify_sentiment("No chance, it will drop."), Sentiment::Negative);
        assert_eq!(classify_sentiment("Moon mission confirmed"), Sentiment::Positive);
        assert_eq!(classify_sentiment("The fog is thick."), Sentiment::Neutral);
        // substring matches don't count
        assert_eq!(classify_sentiment("Nobody knows"), Sentiment::Neutral);
    }
}
