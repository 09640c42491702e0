//! Mock Text Provider
//!
//! For testing and offline demo runs. Returns a canned reply and counts
//! calls so tests can assert whether the upstream was reached.

use std::sync::atomic::{AtomicUsize, Ordering};

use advisor_core::{
    error::Result,
    provider::{Completion, GenerationOptions, ProviderInfo, TextProvider},
};
use async_trait::async_trait;

const DEFAULT_REPLY: &str = r#"{
  "MarketBenchmarks": {"CPA": 35.0, "CR": 0.02, "ROAS": 3.5},
  "Analysis": ["1. أداء المتجر قريب من متوسط السوق.", "2. معدل التحويل ضمن النطاق المعتاد."],
  "Recommendations": ["1. حسّن صفحات المنتجات.", "2. راجع استهداف الحملات الإعلانية."]
}"#;

/// Mock provider with a configurable canned reply
pub struct MockProvider {
    reply: String,
    calls: AtomicUsize,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            reply: DEFAULT_REPLY.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create with a specific reply (for testing normalization paths)
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completions served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    async fn info(&self) -> Result<ProviderInfo> {
        Ok(ProviderInfo {
            name: "Mock".into(),
            version: Some(env!("CARGO_PKG_VERSION").into()),
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true) // Mock always healthy
    }

    async fn complete(&self, _prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(Completion {
            content: self.reply.clone(),
            model: options.model.clone(),
            usage: None,
            truncated: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let provider = MockProvider::with_reply("{}");
        assert_eq!(provider.call_count(), 0);

        let completion = provider
            .complete("anything", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.content, "{}");
        assert_eq!(provider.call_count(), 1);
    }
}
