//! # store-insights
//!
//! Store performance analysis for the Saudi market: derived marketing
//! metrics, model-estimated market benchmarks, and qualitative
//! recommendations.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌───────────────┐   ┌──────────────┐
//! │ ClientInputs │──▶│  metrics   │──▶│ MarketAdvisor │──▶│ ReportRecord │
//! │  (validated) │   │ CPA/CR/ROAS│   │ prompt + LLM  │   │  (normalized)│
//! └──────────────┘   └────────────┘   └───────────────┘   └──────────────┘
//! ```
//!
//! The upstream model is untrusted: its replies pass through a
//! parse-or-default normalizer that never fails, so downstream rendering
//! always has a well-formed record to show. No state survives an
//! invocation - every call recomputes and re-queries from scratch.

pub mod advisor;
pub mod error;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use advisor::MarketAdvisor;
pub use error::{InsightError, Result};
pub use model::{
    ClientAnalysis, ClientInputs, ClientMetrics, MarketBenchmarks, MarketReport, ReportRecord,
    Swot,
};
pub use pipeline::{AnalysisPipeline, BulkRow, BulkRowOutcome, DomainKind, domain_label};
