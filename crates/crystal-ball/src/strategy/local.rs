//! Local Strategy
//!
//! Canned predictions picked from a fixed table. No network involved, so
//! the ball keeps working when every backend is down.

use std::sync::Arc;

use async_trait::async_trait;
use oracle_core::{Destination, PredictionGenerator, PredictionResult, Sentiment};

use crate::entropy::{Clock, RandomSource, SystemClock, ThreadRandom};

/// Chance that an over-long question gets deflected
pub const DEFAULT_DEFLECTION_PROBABILITY: f64 = 0.2;

/// Questions longer than this (in characters) may be deflected
pub const LONG_QUERY_CHARS: usize = 50;

/// Lowercase keywords that turn a question into a price call
const PRICE_KEYWORDS: [&str; 4] = ["price", "market cap", "marketcap", "mcap"];

const DEFLECTION: &str =
    "Your question is longer than a bear market. The Oracle needs fewer words... or more SOL. 🌀";

/// One row of the prediction table
#[derive(Clone, Copy, Debug)]
pub struct CannedPrediction {
    pub text: &'static str,
    /// bullish, bearish or anything else
    pub mood: &'static str,
    pub destination: Destination,
}

impl CannedPrediction {
    pub fn to_result(self, query: &str) -> PredictionResult {
        PredictionResult::new(self.text, Sentiment::from_mood(self.mood), self.destination, query)
    }
}

/// The fixed prediction table
pub const PREDICTIONS: [CannedPrediction; 12] = [
    CannedPrediction {
        text: "The stars align: SOL goes parabolic before the next full moon. 🚀🌕",
        mood: "bullish",
        destination: Destination::Jupiter,
    },
    CannedPrediction {
        text: "I see red candles in your near future. Hedge while you still can, mortal. 🕯️📉",
        mood: "bearish",
        destination: Destination::Dflow,
    },
    CannedPrediction {
        text: "The odds are shifting in your favor. Place your bet before the mist clears. 🎲",
        mood: "bullish",
        destination: Destination::Kalshi,
    },
    CannedPrediction {
        text: "A fresh ticker rises from the bonding curve... it smells like a 100x. 🐸",
        mood: "bullish",
        destination: Destination::Pump,
    },
    CannedPrediction {
        text: "The chain reveals nothing today. Study the validators and return. 📚",
        mood: "cryptic",
        destination: Destination::Solana,
    },
    CannedPrediction {
        text: "Liquidity drains like sand through the hourglass. The bears feast tonight. 🐻",
        mood: "bearish",
        destination: Destination::Dflow,
    },
    CannedPrediction {
        text: "Yes. The Oracle has spoken, and the Oracle is never wrong (not financial advice). ✅",
        mood: "bullish",
        destination: Destination::Kalshi,
    },
    CannedPrediction {
        text: "No. The spirits shake their heads in unison. ❌",
        mood: "bearish",
        destination: Destination::Kalshi,
    },
    CannedPrediction {
        text: "Cloudy with a chance of airdrops. Keep your wallet close. ☁️🪂",
        mood: "cryptic",
        destination: Destination::Jupiter,
    },
    CannedPrediction {
        text: "Your bags will be heavy, but with gold, not regret. 💰",
        mood: "bullish",
        destination: Destination::Jupiter,
    },
    CannedPrediction {
        text: "The market can stay irrational longer than you can stay solvent. Choose wisely. 🔮",
        mood: "cryptic",
        destination: Destination::Dflow,
    },
    CannedPrediction {
        text: "Degen energy detected. Ape carefully, anon. 🦍",
        mood: "cryptic",
        destination: Destination::Pump,
    },
];

/// Table-driven prediction generator
pub struct LocalGenerator {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    deflection_probability: f64,
}

impl Default for LocalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalGenerator {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            random: Arc::new(ThreadRandom),
            deflection_probability: DEFAULT_DEFLECTION_PROBABILITY,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Probability in `[0, 1]`; out-of-range values are clamped
    #[must_use]
    pub fn with_deflection_probability(mut self, probability: f64) -> Self {
        self.deflection_probability = if probability.is_nan() {
            DEFAULT_DEFLECTION_PROBABILITY
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Pick a prediction synchronously
    pub fn predict(&self, query: &str, price_context: &str) -> PredictionResult {
        if is_price_question(query) {
            return price_call(query, price_context);
        }

        if query.chars().count() > LONG_QUERY_CHARS
            && self.random.roll() < self.deflection_probability
        {
            return PredictionResult::new(DEFLECTION, Sentiment::Neutral, Destination::Solana, query);
        }

        let index = table_index(query, self.clock.now().timestamp_millis(), PREDICTIONS.len());
        PREDICTIONS[index].to_result(query)
    }
}

#[async_trait]
impl PredictionGenerator for LocalGenerator {
    async fn generate(&self, query: &str, price_context: &str) -> PredictionResult {
        self.predict(query, price_context)
    }

    fn name(&self) -> &str {
        "local"
    }
}

fn is_price_question(query: &str) -> bool {
    let query = query.to_lowercase();
    PRICE_KEYWORDS.iter().any(|k| query.contains(k))
}

/// Bullish call quoting the current price
fn price_call(query: &str, price_context: &str) -> PredictionResult {
    let figure = price_figure(price_context);
    PredictionResult::new(
        format!(
            "The charts whisper that {figure} is only the floor. Up only from here, anon. 🚀📈 (Not financial advice)"
        ),
        Sentiment::Positive,
        Destination::Jupiter,
        query,
    )
}

/// Numeric portion of a price string (`"$145.20 (Oracle estimate)"` -> `"145.20"`)
fn price_figure(price_context: &str) -> &str {
    let Some(start) = price_context.find(|c: char| c.is_ascii_digit()) else {
        return price_context.trim();
    };
    let rest = &price_context[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(rest.len());
    rest[..end].trim_end_matches(['.', ','])
}

/// Table row for a question: character-code sum plus the clock, modulo the table size
fn table_index(query: &str, millis: i64, len: usize) -> usize {
    let char_sum: u64 = query.chars().map(|c| u64::from(u32::from(c))).sum();
    let seed = char_sum.wrapping_add(millis.unsigned_abs());
    (seed % len as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{FixedClock, FixedRoll};

    const FROZEN_MILLIS: i64 = 1_700_000_000_000;

    fn frozen(roll: f64) -> LocalGenerator {
        LocalGenerator::new()
            .with_clock(Arc::new(FixedClock::from_millis(FROZEN_MILLIS).unwrap()))
            .with_random(Arc::new(FixedRoll(roll)))
    }

    #[tokio::test]
    async fn test_frozen_clock_picks_fixed_row() {
        // char sum 1942 + 1_700_000_000_000 = ...1942, mod 12 = 6
        let query = "Will SOL flip ETH by 2026?";
        let result = frozen(0.0).generate(query, "$180").await;

        assert_eq!(
            result.text,
            "Yes. The Oracle has spoken, and the Oracle is never wrong (not financial advice). ✅"
        );
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.cta_url, "https://kalshi.com/");
        assert_eq!(result.cta_label, "Bet on Kalshi");
        assert_eq!(result.source_query.as_deref(), Some(query));
    }

    #[test]
    fn test_time_moves_the_pick() {
        let query = "Will SOL flip ETH by 2026?";
        let later = frozen(0.0).with_clock(Arc::new(FixedClock::from_millis(FROZEN_MILLIS + 1).unwrap()));
        assert_eq!(later.predict(query, "$180").text, PREDICTIONS[7].text);
    }

    #[test]
    fn test_price_question_quotes_price() {
        let result = frozen(0.0).predict("What's the SOL PRICE next week?", "$180");
        assert!(result.text.contains("180"));
        assert!(!result.text.contains('$'));
        assert_eq!(result.destination(), Some(Destination::Jupiter));
        assert_eq!(result.cta_label, "Long it on Jupiter");
        assert_eq!(result.sentiment, Sentiment::Positive);

        let cap = frozen(0.0).predict("Will BONK market cap pass DOGE?", "$145.20 (Oracle estimate)");
        assert!(cap.text.contains("145.20"));
    }

    #[test]
    fn test_long_question_deflection() {
        let long = "Will the validators of the Solana network vote to halve inflation before the next halving?";
        assert!(long.chars().count() > LONG_QUERY_CHARS);

        let deflected = frozen(0.1).predict(long, "$180");
        assert_eq!(deflected.text, DEFLECTION);
        assert_eq!(deflected.sentiment, Sentiment::Neutral);
        assert_eq!(deflected.destination(), Some(Destination::Solana));

        let answered = frozen(0.5).predict(long, "$180");
        assert_ne!(answered.text, DEFLECTION);
    }

    #[test]
    fn test_short_question_never_deflected() {
        let never = frozen(0.0).with_deflection_probability(1.0);
        assert_ne!(never.predict("Wen Lambo?", "$180").text, DEFLECTION);
    }

    #[test]
    fn test_every_result_uses_fixed_destinations() {
        let queries = [
            "Will SOL flip ETH by 2026?",
            "Next 100x meme coin?",
            "price?",
            "",
            "Will it rain in London tomorrow? And also next week? And the week after that?",
        ];
        for (offset, query) in (0..24).zip(queries.iter().cycle()) {
            let generator = LocalGenerator::new()
                .with_clock(Arc::new(FixedClock::from_millis(FROZEN_MILLIS + offset).unwrap()))
                .with_random(Arc::new(FixedRoll(0.05)));
            let result = generator.predict(query, "UNKNOWN");

            assert!(Destination::is_member(&result.cta_url, &result.cta_label));
            assert!(!result.text.is_empty());
            assert_eq!(result.source_query.as_deref(), Some(*query));
        }
    }

    #[test]
    fn test_price_figure() {
        assert_eq!(price_figure("$180"), "180");
        assert_eq!(price_figure("$1,234.50"), "1,234.50");
        assert_eq!(price_figure("$145.20 (Oracle estimate)"), "145.20");
        assert_eq!(price_figure("UNKNOWN"), "UNKNOWN");
    }

    #[test]
    fn test_deflection_probability_is_clamped() {
        let generator = LocalGenerator::new().with_deflection_probability(3.0);
        assert!((generator.deflection_probability - 1.0).abs() < f64::EPSILON);
        let generator = LocalGenerator::new().with_deflection_probability(f64::NAN);
        assert!((generator.deflection_probability - DEFAULT_DEFLECTION_PROBABILITY).abs() < f64::EPSILON);
    }
}
