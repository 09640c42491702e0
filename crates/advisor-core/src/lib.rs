//! # advisor-core
//!
//! Core abstractions for the store-performance market advisor.
//!
//! The central piece is the `TextProvider` trait: one opaque prompt string
//! in, one text completion out. Everything above this crate depends only on
//! that contract, so the advisor works with any text-generation backend
//! (hosted Gemini, a canned mock, or anything else) without code changes.

pub mod provider;
pub mod error;

pub use error::{ProviderError, Result};
pub use provider::{Completion, GenerationOptions, ProviderInfo, TextProvider, TokenUsage};
