//! Price Feeds
//!
//! Implementations of `oracle_core::PriceFeed`. Every feed renders a
//! display-ready string and falls back to [`FALLBACK_PRICE`] on failure.

mod coingecko;
mod fixed;

pub use coingecko::{CoinGeckoFeed, DEFAULT_PRICE_API};
pub use fixed::StaticPriceFeed;

use rust_decimal::Decimal;

/// Shown when the price provider cannot be reached
pub const FALLBACK_PRICE: &str = "$145.20 (Oracle estimate)";

/// Shown when the provider answers without a price for the asset
pub const UNKNOWN_PRICE: &str = "UNKNOWN";

/// Render a USD price the way the ball displays it (`$180`, `$145.2`)
pub fn format_usd(price: Decimal) -> String {
    format!("${}", price.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd_drops_trailing_zeros() {
        assert_eq!(format_usd(dec!(180)), "$180");
        assert_eq!(format_usd(dec!(180.00)), "$180");
        assert_eq!(format_usd(dec!(145.20)), "$145.2");
        assert_eq!(format_usd(dec!(0.000022)), "$0.000022");
    }
}
