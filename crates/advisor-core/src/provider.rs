//! Text Provider Strategy Pattern
//!
//! Defines a common interface for text-generation backends (Gemini, mock,
//! etc.) so the advisor can work with any of them without code changes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_core::provider::{TextProvider, GenerationOptions};
//!
//! // Create a provider
//! let provider = GeminiProvider::new(config)?;
//!
//! // Use through the trait
//! let completion = provider.complete(prompt, &options).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for text generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 { 0.4 }
fn default_max_tokens() -> u32 { 2048 }
fn default_top_p() -> f32 { 0.9 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

/// Response from a text completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Whether the response was truncated
    pub truncated: bool,
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Provider metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "Gemini", "Mock")
    pub name: String,

    /// Provider version
    pub version: Option<String>,
}

/// Strategy trait for text-generation providers
///
/// Implement this trait to add support for new backends. The advisor works
/// exclusively through this interface: one prompt string in, one completion
/// out. The backend may be slow, unavailable, or return malformed output;
/// no contract beyond "returns text or fails" is assumed here.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Get provider information
    async fn info(&self) -> Result<ProviderInfo>;

    /// Check if the provider is available and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion for a single prompt
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.temperature, 0.4);
        assert_eq!(opts.max_tokens, 2048);
        assert_eq!(opts.model, "gemini-2.5-flash");
    }
}
