//! # oracle-core
//!
//! Interaction core of the crystal ball: prediction model, session state and
//! the shake controller, with every external collaborator behind a trait.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   InteractionController                       │
//! │  ┌─────────────┐  ┌──────────────────────┐  ┌──────────────┐  │
//! │  │  PriceFeed  │──│ PredictionGenerator  │──│ KeyValueStore│  │
//! │  │  (Strategy) │  │  (remote | local)    │  │  (counter)   │  │
//! │  └─────────────┘  └──────────────────────┘  └──────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the remote strategy run against Ollama or
//! any other generative backend without changing controller logic.

pub mod controller;
pub mod error;
pub mod message;
pub mod oracle;
pub mod prediction;
pub mod provider;
pub mod state;
pub mod store;

pub use controller::{ControllerBuilder, ControllerConfig, InteractionController, ShakeOutcome};
pub use error::{OracleError, Result};
pub use message::{Message, Role};
pub use oracle::{Cue, Notifier, PredictionGenerator, PriceFeed, TracingNotifier};
pub use prediction::{Destination, PredictionResult, Sentiment};
pub use provider::LlmProvider;
pub use state::{InteractionSnapshot, InteractionState};
pub use store::{History, JsonFileStore, KeyValueStore, MemoryStore, PendingCount, ShakeCounter};
