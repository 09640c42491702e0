//! Analysis Pipeline
//!
//! One parametrized pipeline for every entry point: validate the inputs,
//! compute the metrics, ask the advisor, hand the record back. Entry
//! points differ only in where inputs come from and which domain label
//! they build, so they all funnel through here instead of duplicating the
//! sequence.
//!
//! The bulk driver iterates rows strictly sequentially: one provider call
//! at a time, so a run over N rows costs N times the single-call latency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::advisor::MarketAdvisor;
use crate::error::Result;
use crate::metrics;
use crate::model::{ClientAnalysis, ClientInputs, MarketBenchmarks};

/// Business kind behind an analysis request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Dropshipping,
    PrivateProducts,
    OfflineBusiness,
}

impl DomainKind {
    pub fn label(self) -> &'static str {
        match self {
            DomainKind::Dropshipping => "Dropshipping",
            DomainKind::PrivateProducts => "Private Products",
            DomainKind::OfflineBusiness => "Offline Business",
        }
    }
}

/// Build the domain label used to contextualize the prompt, e.g.
/// "Dropshipping - Fashion - Abayas".
pub fn domain_label(kind: DomainKind, category: Option<&str>, subcategory: Option<&str>) -> String {
    let mut label = kind.label().to_string();
    if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
        label.push_str(" - ");
        label.push_str(category.trim());
    }
    if let Some(subcategory) = subcategory.filter(|s| !s.trim().is_empty()) {
        label.push_str(" - ");
        label.push_str(subcategory.trim());
    }
    label
}

/// One spreadsheet-style row in a bulk run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkRow {
    /// Domain label for this row
    pub field: String,

    pub ad_budget: Decimal,
    pub orders: Decimal,
    pub visits: Decimal,
    pub product_price: Decimal,
}

impl BulkRow {
    fn inputs(&self) -> ClientInputs {
        ClientInputs::new(self.ad_budget, self.orders, self.visits, self.product_price)
    }
}

/// Per-row result of a bulk run, flattened to spreadsheet-friendly text
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkRowOutcome {
    pub field: String,

    pub cpa: Decimal,
    pub cr: Decimal,
    pub roas: Decimal,

    pub market: MarketBenchmarks,

    /// Analysis lines joined with " | "
    pub analysis: String,

    /// Recommendation lines joined with " | "
    pub recommendations: String,

    /// Error text when this row failed validation or the upstream call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The single pipeline shared by all entry points
pub struct AnalysisPipeline {
    advisor: MarketAdvisor,
}

impl AnalysisPipeline {
    pub fn new(advisor: MarketAdvisor) -> Self {
        Self { advisor }
    }

    pub fn advisor(&self) -> &MarketAdvisor {
        &self.advisor
    }

    /// Run the pipeline for one client submission.
    ///
    /// Validation failures abort before metric computation and before any
    /// provider call.
    pub async fn run(&self, inputs: &ClientInputs, field: &str) -> Result<ClientAnalysis> {
        inputs.validate()?;

        let metrics = metrics::compute(inputs);
        let report = self
            .advisor
            .analyze(field, &metrics, inputs.orders, inputs.visits)
            .await?;

        Ok(ClientAnalysis {
            field: field.to_string(),
            inputs: inputs.clone(),
            metrics,
            report,
        })
    }

    /// Drive an ordered sequence of rows, appending one flattened outcome
    /// per row. A row that fails validation or whose upstream call fails
    /// records the error and the run continues with the next row.
    pub async fn run_bulk(&self, rows: &[BulkRow]) -> Vec<BulkRowOutcome> {
        let mut outcomes = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let inputs = row.inputs();

            if let Err(e) = inputs.validate() {
                tracing::warn!(index, error = %e, "bulk row rejected");
                outcomes.push(BulkRowOutcome {
                    field: row.field.clone(),
                    cpa: Decimal::ZERO,
                    cr: Decimal::ZERO,
                    roas: Decimal::ZERO,
                    market: MarketBenchmarks::default(),
                    analysis: String::new(),
                    recommendations: String::new(),
                    error: Some(e.user_message()),
                });
                continue;
            }

            let metrics = metrics::compute(&inputs);
            let (market, analysis, recommendations, error) = match self
                .advisor
                .analyze(&row.field, &metrics, inputs.orders, inputs.visits)
                .await
            {
                Ok(record) => (
                    record.benchmarks,
                    record.analysis.join(" | "),
                    record.recommendations.join(" | "),
                    None,
                ),
                Err(e) => {
                    tracing::warn!(index, error = %e, "bulk row analysis failed");
                    (
                        MarketBenchmarks::default(),
                        String::new(),
                        String::new(),
                        Some(e.user_message()),
                    )
                }
            };

            outcomes.push(BulkRowOutcome {
                field: row.field.clone(),
                cpa: metrics.cost_per_acquisition,
                cr: metrics.conversion_rate,
                roas: metrics.return_on_ad_spend,
                market,
                analysis,
                recommendations,
                error,
            });
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsightError;
    use advisor_core::GenerationOptions;
    use advisor_runtime::MockProvider;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    const REPLY: &str = r#"{
        "MarketBenchmarks": {"CPA": 25, "CR": 0.02, "ROAS": 3},
        "Analysis": ["1. جيد.", "2. مقبول."],
        "Recommendations": ["1. استمر."]
    }"#;

    fn pipeline_with(provider: Arc<MockProvider>) -> AnalysisPipeline {
        AnalysisPipeline::new(MarketAdvisor::new(provider, GenerationOptions::default()))
    }

    #[tokio::test]
    async fn test_run_happy_path() {
        let provider = Arc::new(MockProvider::with_reply(REPLY));
        let pipeline = pipeline_with(provider.clone());

        let inputs = ClientInputs::new(dec!(1000), dec!(50), dec!(2000), dec!(80));
        let analysis = pipeline.run(&inputs, "Dropshipping - أزياء").await.unwrap();

        assert_eq!(analysis.metrics.cost_per_acquisition, dec!(20));
        assert_eq!(analysis.report.benchmarks.cpa, dec!(25));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_rejects_before_provider_call() {
        let provider = Arc::new(MockProvider::with_reply(REPLY));
        let pipeline = pipeline_with(provider.clone());

        let inputs = ClientInputs::new(dec!(1000), dec!(100), dec!(50), dec!(80));
        let err = pipeline.run(&inputs, "Offline Business").await.unwrap_err();

        assert!(matches!(err, InsightError::OrdersExceedVisits { .. }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_bulk_continues_past_bad_rows() {
        let provider = Arc::new(MockProvider::with_reply(REPLY));
        let pipeline = pipeline_with(provider.clone());

        let rows = vec![
            BulkRow {
                field: "أثاث".into(),
                ad_budget: dec!(500),
                orders: dec!(200), // invalid: orders > visits
                visits: dec!(100),
                product_price: dec!(30),
            },
            BulkRow {
                field: "عطور".into(),
                ad_budget: dec!(1000),
                orders: dec!(50),
                visits: dec!(2000),
                product_price: dec!(80),
            },
        ];

        let outcomes = pipeline.run_bulk(&rows).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].error.is_some());
        assert_eq!(outcomes[0].cpa, Decimal::ZERO);
        assert!(outcomes[1].error.is_none());
        assert_eq!(outcomes[1].cpa, dec!(20));
        assert_eq!(outcomes[1].analysis, "1. جيد. | 2. مقبول.");
        // Only the valid row reached the upstream
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_domain_label_building() {
        assert_eq!(
            domain_label(DomainKind::Dropshipping, Some("أزياء"), Some("عبايات")),
            "Dropshipping - أزياء - عبايات"
        );
        assert_eq!(
            domain_label(DomainKind::PrivateProducts, None, None),
            "Private Products"
        );
        assert_eq!(
            domain_label(DomainKind::OfflineBusiness, Some("  "), Some("مطاعم")),
            "Offline Business - مطاعم"
        );
    }
}
