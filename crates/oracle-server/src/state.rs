//! Application State

use std::sync::Arc;

use oracle_core::{InteractionController, LlmProvider};

use crate::config::StrategyKind;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The single interaction controller for this process
    pub controller: Arc<InteractionController>,

    /// Generative backend (only with the remote strategy)
    pub provider: Option<Arc<dyn LlmProvider>>,

    /// Strategy answering questions
    pub strategy: StrategyKind,

    /// Page URL embedded in share links
    pub public_url: Arc<str>,
}
