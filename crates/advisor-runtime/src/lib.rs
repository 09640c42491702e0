//! # advisor-runtime
//!
//! Runtime providers for the store advisor.
//!
//! ## Providers
//!
//! - **Gemini** (default): hosted Google Generative Language API
//! - **Mock**: canned replies for tests and offline demo runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_runtime::gemini::{GeminiConfig, GeminiProvider};
//!
//! let provider = GeminiProvider::new(GeminiConfig::from_env()?)?;
//! let completion = provider.complete(prompt, &options).await?;
//! ```

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use mock::MockProvider;

// Re-export core types for convenience
pub use advisor_core::{Completion, GenerationOptions, ProviderError, Result, TextProvider};
