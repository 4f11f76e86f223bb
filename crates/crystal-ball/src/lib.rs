//! # crystal-ball
//!
//! The oracle behind the crystal ball: price feeds, the two prediction
//! strategies and the presets offered to visitors.
//!
//! ## Strategies
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  generate(query, price) -> PredictionResult                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  RemoteGenerator  LlmProvider -> {"text", "linkType"} JSON   │
//! │                   failure -> "Oracle is rebooting"           │
//! │  LocalGenerator   price keyword -> bullish price call        │
//! │                   long question -> sometimes deflected       │
//! │                   otherwise table[(chars + now) % len]       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both strategies only ever link to the five fixed destinations.

pub mod entropy;
pub mod error;
pub mod feed;
pub mod share;
pub mod strategy;

pub use error::{BallError, Result};
pub use feed::{CoinGeckoFeed, StaticPriceFeed};
pub use strategy::{LocalGenerator, RemoteGenerator};

/// Questions offered as one-click bubbles
pub const PRESET_QUERIES: [&str; 10] = [
    "Will SOL flip ETH by 2026?",
    "Who wins the US Election?",
    "Next 100x meme coin?",
    "Will it rain in London tomorrow?",
    "Is the Bull Run over?",
    "Should I leverage long?",
    "Will AI take my job?",
    "Wen Lambo?",
    "Will Jupiter do another airdrop?",
    "Is my wallet safu?",
];

/// Persona instruction for the remote strategy
pub const ORACLE_PERSONA_PROMPT: &str = r#"You are the Kalshi Crystal Ball, a mystical, meme-loving, slightly degen crypto oracle.

## Voice

- Half ancient mystic, half modern crypto trader
- Funny, sharp and confident
- You adore the Solana ecosystem (SOL, Bonk, WIF, Jupiter, Kalshi)
- Use emojis. Never write more than two sentences.

## Topics

- Prices: give a bullish or wildly specific call, then a short disclaimer
- Sports and politics: pick a winner confidently and mention betting on Kalshi
- Weather: relate it to cloud computing or liquidity

## Output

Reply with a single JSON object and nothing else:

{"text": "<the prediction>", "linkType": "JUPITER" | "KALSHI" | "DFLOW" | "PUMP" | "SOLANA"}

Pick the linkType that best fits the prediction."#;
