//! Server Configuration
//!
//! Read from the environment (after `.env` is loaded). Every setting has a
//! default so the ball runs offline with no configuration at all.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use crystal_ball::strategy::DEFAULT_DEFLECTION_PROBABILITY;
use oracle_core::controller::{DEFAULT_ASSET, DEFAULT_SHAKE_DELAY};

/// Which prediction strategy answers questions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    Local,
    Remote,
}

/// Where prices come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    CoinGecko,
    Static,
}

#[derive(Clone, Debug)]
pub struct OracleConfig {
    pub bind_addr: String,
    pub strategy: StrategyKind,
    pub model: String,
    pub price_feed: FeedKind,
    pub price_api_url: Option<String>,
    pub asset: String,
    /// JSON file for the shake counter; in-memory when unset
    pub counter_path: Option<PathBuf>,
    pub shake_delay: Duration,
    pub deflection_probability: f64,
    pub static_dir: PathBuf,
    /// Page URL embedded in share links
    pub public_url: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            strategy: StrategyKind::Local,
            model: "llama3.2".into(),
            price_feed: FeedKind::CoinGecko,
            price_api_url: None,
            asset: DEFAULT_ASSET.into(),
            counter_path: None,
            shake_delay: DEFAULT_SHAKE_DELAY,
            deflection_probability: DEFAULT_DEFLECTION_PROBABILITY,
            static_dir: PathBuf::from("static"),
            public_url: "http://localhost:3000".into(),
        }
    }
}

impl OracleConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(strategy) = lookup("ORACLE_STRATEGY") {
            config.strategy = match strategy.trim().to_ascii_lowercase().as_str() {
                "local" => StrategyKind::Local,
                "remote" => StrategyKind::Remote,
                other => bail!("ORACLE_STRATEGY must be 'local' or 'remote', got '{other}'"),
            };
        }

        if let Some(model) = lookup("ORACLE_MODEL") {
            config.model = model;
        }

        if let Some(feed) = lookup("PRICE_FEED") {
            config.price_feed = match feed.trim().to_ascii_lowercase().as_str() {
                "coingecko" => FeedKind::CoinGecko,
                "static" => FeedKind::Static,
                other => bail!("PRICE_FEED must be 'coingecko' or 'static', got '{other}'"),
            };
        }

        config.price_api_url = lookup("PRICE_API_URL");

        if let Some(asset) = lookup("PRICE_ASSET") {
            if asset.trim().is_empty() {
                bail!("PRICE_ASSET must not be empty");
            }
            config.asset = asset;
        }

        config.counter_path = lookup("COUNTER_PATH").map(PathBuf::from);

        if let Some(delay) = lookup("SHAKE_DELAY_MS") {
            let millis: u64 = delay
                .trim()
                .parse()
                .with_context(|| format!("SHAKE_DELAY_MS is not a number: '{delay}'"))?;
            config.shake_delay = Duration::from_millis(millis);
        }

        if let Some(probability) = lookup("DEFLECTION_PROBABILITY") {
            let value: f64 = probability
                .trim()
                .parse()
                .with_context(|| format!("DEFLECTION_PROBABILITY is not a number: '{probability}'"))?;
            if !(0.0..=1.0).contains(&value) {
                bail!("DEFLECTION_PROBABILITY must be within 0..=1, got {value}");
            }
            config.deflection_probability = value;
        }

        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("PUBLIC_URL") {
            config.public_url = url;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<OracleConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        OracleConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.strategy, StrategyKind::Local);
        assert_eq!(config.price_feed, FeedKind::CoinGecko);
        assert_eq!(config.asset, "solana");
        assert_eq!(config.shake_delay, Duration::from_millis(1500));
        assert!(config.counter_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ORACLE_STRATEGY", "Remote"),
            ("PRICE_FEED", "static"),
            ("SHAKE_DELAY_MS", "0"),
            ("DEFLECTION_PROBABILITY", "0.5"),
            ("COUNTER_PATH", "data/counter.json"),
        ])
        .unwrap();

        assert_eq!(config.strategy, StrategyKind::Remote);
        assert_eq!(config.price_feed, FeedKind::Static);
        assert_eq!(config.shake_delay, Duration::ZERO);
        assert!((config.deflection_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.counter_path, Some(PathBuf::from("data/counter.json")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("ORACLE_STRATEGY", "psychic")]).is_err());
        assert!(config_from(&[("SHAKE_DELAY_MS", "soon")]).is_err());
        assert!(config_from(&[("DEFLECTION_PROBABILITY", "1.5")]).is_err());
        assert!(config_from(&[("PRICE_ASSET", " ")]).is_err());
    }
}
