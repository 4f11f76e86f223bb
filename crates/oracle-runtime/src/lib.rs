//! # oracle-runtime
//!
//! Generative-text backends for the crystal-ball oracle.
//!
//! ## Backends
//!
//! - **Ollama** (default feature `ollama`): local inference
//!
//! ```rust,ignore
//! let provider = Arc::new(OllamaProvider::from_env());
//! let generator = RemoteGenerator::new(provider, GenerationOptions::for_model("llama3.2"));
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

pub use oracle_core::{LlmProvider, OracleError, Result};
