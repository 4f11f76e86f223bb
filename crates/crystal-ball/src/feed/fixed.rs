//! Static Price Feed
//!
//! For offline demos and tests. Returns fixed quotes for a handful of
//! Solana-ecosystem assets.

use async_trait::async_trait;
use oracle_core::PriceFeed;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{FALLBACK_PRICE, format_usd};

/// Price feed with static quotes
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPriceFeed;

impl StaticPriceFeed {
    pub const fn new() -> Self {
        Self
    }

    /// Fixed quote by CoinGecko asset id
    fn quote(asset_id: &str) -> Option<Decimal> {
        match asset_id.to_ascii_lowercase().as_str() {
            "solana" => Some(dec!(195)),
            "bitcoin" => Some(dec!(97500)),
            "ethereum" => Some(dec!(3450)),
            "jupiter-exchange-solana" => Some(dec!(0.85)),
            "bonk" => Some(dec!(0.000032)),
            "dogwifcoin" => Some(dec!(2.15)),
            _ => None,
        }
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn fetch_price(&self, asset_id: &str) -> String {
        Self::quote(asset_id).map_or_else(
            || {
                tracing::warn!(asset = asset_id, "No static quote, using fallback");
                FALLBACK_PRICE.into()
            },
            format_usd,
        )
    }

    fn name(&self) -> &str {
        "Static"
    }
}
