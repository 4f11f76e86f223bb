//! Share Links

use oracle_core::PredictionResult;
use reqwest::Url;

const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";
const HASHTAGS: &str = "Solana,Kalshi,CryptoOracle";

/// Tweet-intent URL announcing a prediction, linking back to `page_url`
pub fn share_url(prediction: &PredictionResult, page_url: &str) -> String {
    let text = format!(
        "🔮 The Kalshi Crystal Ball predicts: \"{}\" \n\nSee your future now:",
        prediction.text
    );

    Url::parse_with_params(
        TWEET_INTENT,
        &[("text", text.as_str()), ("url", page_url), ("hashtags", HASHTAGS)],
    )
    .map_or_else(|_| TWEET_INTENT.to_string(), String::from)
}
