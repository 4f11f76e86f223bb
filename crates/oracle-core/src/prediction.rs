//! Prediction Model
//!
//! The outcome of one oracle invocation and the fixed call-to-action table
//! every normal prediction links into.

use serde::{Deserialize, Serialize};

/// Display emphasis of a prediction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a canned-prediction mood onto a sentiment tag
    pub fn from_mood(mood: &str) -> Self {
        match mood.to_ascii_lowercase().as_str() {
            "bullish" => Self::Positive,
            "bearish" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// The five fixed call-to-action destinations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Destination {
    /// Swap venue
    Jupiter,
    /// Prediction market
    Kalshi,
    /// Hedging venue
    Dflow,
    /// Speculative launch venue
    Pump,
    /// General education
    Solana,
}

impl Destination {
    pub const ALL: [Self; 5] = [
        Self::Jupiter,
        Self::Kalshi,
        Self::Dflow,
        Self::Pump,
        Self::Solana,
    ];

    /// Wire key used by backends (`linkType`)
    pub const fn key(self) -> &'static str {
        match self {
            Self::Jupiter => "JUPITER",
            Self::Kalshi => "KALSHI",
            Self::Dflow => "DFLOW",
            Self::Pump => "PUMP",
            Self::Solana => "SOLANA",
        }
    }

    pub const fn url(self) -> &'static str {
        match self {
            Self::Jupiter => "https://jup.ag/swap/SOL-USDC",
            Self::Kalshi => "https://kalshi.com/",
            Self::Dflow => "https://dflow.net/",
            Self::Pump => "https://pump.fun/",
            Self::Solana => "https://solana.com/",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Jupiter => "Long it on Jupiter",
            Self::Kalshi => "Bet on Kalshi",
            Self::Dflow => "Hedge on DFlow",
            Self::Pump => "Ape in on pump.fun",
            Self::Solana => "Learn about Solana",
        }
    }

    /// Case-insensitive lookup of a wire key
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(key))
    }

    /// Whether a url/label pair belongs to the fixed table
    pub fn is_member(url: &str, label: &str) -> bool {
        Self::ALL
            .iter()
            .any(|d| d.url() == url && d.label() == label)
    }
}

/// Status page linked by the "oracle rebooting" result
pub const NETWORK_STATUS_URL: &str = "https://solana.com/status";
/// Status page linked by the "network congested" result
pub const CONGESTION_STATUS_URL: &str = "https://status.solana.com/";

/// Outcome of one oracle invocation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Prediction sentence(s)
    pub text: String,

    /// Display emphasis
    pub sentiment: Sentiment,

    pub cta_url: String,
    pub cta_label: String,

    /// The question that produced this result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_query: Option<String>,
}

impl PredictionResult {
    /// Result linking to one of the fixed destinations
    pub fn new(
        text: impl Into<String>,
        sentiment: Sentiment,
        destination: Destination,
        query: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            sentiment,
            cta_url: destination.url().into(),
            cta_label: destination.label().into(),
            source_query: Some(query.into()),
        }
    }

    /// Degraded result used when the generative backend cannot be reached
    pub fn oracle_rebooting(query: impl Into<String>) -> Self {
        Self {
            text: "The Oracle is rebooting... 404 Prophecy Not Found.".into(),
            sentiment: Sentiment::Neutral,
            cta_url: NETWORK_STATUS_URL.into(),
            cta_label: "Check Network Status".into(),
            source_query: Some(query.into()),
        }
    }

    /// Fallback shown when a shake cycle fails unexpectedly
    pub fn network_congested() -> Self {
        Self {
            text: "The blockchain is congested. My vision is clouded. Try again, mortal.".into(),
            sentiment: Sentiment::Negative,
            cta_url: CONGESTION_STATUS_URL.into(),
            cta_label: "Check Status".into(),
            source_query: None,
        }
    }

    /// The fixed destination this result links to, if any
    pub fn destination(&self) -> Option<Destination> {
        Destination::ALL
            .into_iter()
            .find(|d| d.url() == self.cta_url && d.label() == self.cta_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_table() {
        assert_eq!(Destination::Jupiter.label(), "Long it on Jupiter");
        assert_eq!(Destination::Kalshi.label(), "Bet on Kalshi");
        assert_eq!(Destination::Dflow.label(), "Hedge on DFlow");
        assert_eq!(Destination::Pump.label(), "Ape in on pump.fun");
        assert_eq!(Destination::Solana.label(), "Learn about Solana");
    }

    #[test]
    fn test_from_key_is_case_insensitive() {
        assert_eq!(Destination::from_key("kalshi"), Some(Destination::Kalshi));
        assert_eq!(Destination::from_key(" PUMP "), Some(Destination::Pump));
        assert_eq!(Destination::from_key("MOON"), None);
    }

    #[test]
    fn test_mood_mapping() {
        assert_eq!(Sentiment::from_mood("bullish"), Sentiment::Positive);
        assert_eq!(Sentiment::from_mood("Bearish"), Sentiment::Negative);
        assert_eq!(Sentiment::from_mood("cryptic"), Sentiment::Neutral);
    }

    #[test]
    fn test_degraded_results_use_status_pages() {
        let rebooting = PredictionResult::oracle_rebooting("q");
        assert_eq!(rebooting.destination(), None);
        assert_eq!(rebooting.cta_url, NETWORK_STATUS_URL);

        let congested = PredictionResult::network_congested();
        assert_eq!(congested.sentiment, Sentiment::Negative);
        assert!(congested.source_query.is_none());
    }
}
