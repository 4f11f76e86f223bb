//! CoinGecko Price Feed
//!
//! Reads `simple/price?ids=<id>&vs_currencies=usd`. No retries; the
//! transport's default timeout applies.

use std::str::FromStr;

use async_trait::async_trait;
use oracle_core::PriceFeed;
use rust_decimal::Decimal;
use serde_json::Value;

use super::{FALLBACK_PRICE, UNKNOWN_PRICE, format_usd};
use crate::error::{BallError, Result};

/// Public CoinGecko v3 API
pub const DEFAULT_PRICE_API: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko-compatible price client
#[derive(Clone, Debug)]
pub struct CoinGeckoFeed {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CoinGeckoFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_API)
    }
}

impl CoinGeckoFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create from `PRICE_API_URL`, defaulting to the public API
    pub fn from_env() -> Self {
        std::env::var("PRICE_API_URL")
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw USD quote; `Ok(None)` when the payload carries no price for the asset
    pub async fn quote(&self, asset_id: &str) -> Result<Option<Decimal>> {
        let url = format!("{}/simple/price", self.base_url.trim_end_matches('/'));

        let response = self.http
            .get(&url)
            .query(&[("ids", asset_id), ("vs_currencies", "usd")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BallError::Status(status));
        }

        let body: Value = response.json().await?;

        body.get(asset_id)
            .and_then(|quote| quote.get("usd"))
            .and_then(Value::as_number)
            .map(|n| parse_price(&n.to_string()))
            .transpose()
            .map(|price| price.filter(|p| !p.is_zero()))
    }
}

fn parse_price(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| BallError::InvalidPrice(raw.to_string()))
}

#[async_trait]
impl PriceFeed for CoinGeckoFeed {
    async fn fetch_price(&self, asset_id: &str) -> String {
        match self.quote(asset_id).await {
            Ok(Some(price)) => format_usd(price),
            Ok(None) => {
                tracing::warn!(asset = asset_id, "No USD price in response");
                UNKNOWN_PRICE.into()
            }
            Err(e) => {
                tracing::warn!(asset = asset_id, "Price fetch failed, using fallback: {}", e);
                FALLBACK_PRICE.into()
            }
        }
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}
