//! Entropy Sources
//!
//! Time and randomness used by the local strategy, injectable so tests can
//! freeze them.

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freeze at a Unix timestamp in milliseconds
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Uniform draws in `[0, 1)`
pub trait RandomSource: Send + Sync {
    fn roll(&self) -> f64;
}

/// Thread-local RNG
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn roll(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Always returns the same draw
#[derive(Clone, Copy, Debug)]
pub struct FixedRoll(pub f64);

impl RandomSource for FixedRoll {
    fn roll(&self) -> f64 {
        self.0
    }
}
