//! Interaction State
//!
//! Session-scoped state of the crystal ball. A single instance lives for the
//! page session and is mutated only by the controller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::prediction::PredictionResult;
use crate::store::{History, KeyValueStore, ShakeCounter};

/// Mutable state owned by the controller
#[derive(Debug)]
pub struct InteractionState {
    /// True from shake start until the cycle completes or fails
    pub busy: bool,

    /// Prediction currently on display
    pub current: Option<PredictionResult>,

    /// Past predictions, most recent first
    pub history: History,

    /// Persisted shake counter
    pub counter: ShakeCounter,
}

impl InteractionState {
    /// Start a session, restoring the counter from the store
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            busy: false,
            current: None,
            history: History::default(),
            counter: ShakeCounter::restore(store),
        }
    }

    /// Point-in-time copy for the presentation layer
    pub fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            busy: self.busy,
            current: self.current.clone(),
            history: self.history.to_vec(),
            shake_count: self.counter.count(),
        }
    }
}

/// Read-only view of [`InteractionState`] handed to renderers
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSnapshot {
    pub busy: bool,
    pub current: Option<PredictionResult>,
    pub history: Vec<PredictionResult>,
    pub shake_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SHAKE_COUNT_KEY};

    #[test]
    fn test_restore_starts_idle() {
        let store = Arc::new(MemoryStore::new());
        store.set(SHAKE_COUNT_KEY, "3").unwrap();

        let state = InteractionState::restore(store);
        let snapshot = state.snapshot();
        assert!(!snapshot.busy);
        assert!(snapshot.current.is_none());
        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.shake_count, 3);
    }
}
