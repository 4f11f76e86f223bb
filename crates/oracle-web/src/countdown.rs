//! Alpha Expiry Countdown

/// Seconds a displayed prediction stays "fresh"
pub const ALPHA_WINDOW_SECS: u32 = 600;

/// `m:ss`, e.g. `10:00`, `0:07`
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One second later, stopping at zero
pub const fn tick(remaining: u32) -> u32 {
    remaining.saturating_sub(1)
}
