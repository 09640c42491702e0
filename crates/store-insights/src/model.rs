//! Domain Models
//!
//! Core data types for store performance analysis.
//! Uses `rust_decimal` for all monetary values and ratios - never f64 for money!

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InsightError, Result};

/// One observation of a store's performance, as entered by the client
/// or read from a spreadsheet row. Immutable once built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientInputs {
    /// Advertising budget (SAR)
    pub ad_budget: Decimal,

    /// Number of orders
    pub orders: Decimal,

    /// Number of store visits
    pub visits: Decimal,

    /// Product price (SAR)
    pub product_price: Decimal,
}

impl ClientInputs {
    pub fn new(ad_budget: Decimal, orders: Decimal, visits: Decimal, product_price: Decimal) -> Self {
        Self {
            ad_budget,
            orders,
            visits,
            product_price,
        }
    }

    /// Check the input invariants.
    ///
    /// An order cannot occur without a visit, so `orders > visits` is
    /// rejected here before any metric computation or upstream call.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("ad_budget", self.ad_budget),
            ("orders", self.orders),
            ("visits", self.visits),
            ("product_price", self.product_price),
        ] {
            if value < Decimal::ZERO {
                return Err(InsightError::NegativeInput { field, value });
            }
        }

        if self.orders > self.visits {
            return Err(InsightError::OrdersExceedVisits {
                orders: self.orders,
                visits: self.visits,
            });
        }

        Ok(())
    }
}

/// Derived marketing ratios. Unrounded raw values; presentation rounding
/// and percentage scaling are the renderer's job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientMetrics {
    /// Ad budget per order (SAR)
    pub cost_per_acquisition: Decimal,

    /// Orders per visit, as a fraction (expected in [0, 1])
    pub conversion_rate: Decimal,

    /// Revenue per SAR of ad spend, as a multiplier
    pub return_on_ad_spend: Decimal,
}

/// Market-average estimates for the same three metrics, sourced from the
/// upstream model. Always numeric with a zero default, never null/missing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MarketBenchmarks {
    pub cpa: Decimal,
    pub cr: Decimal,
    pub roas: Decimal,
}

impl MarketBenchmarks {
    pub fn is_zero(&self) -> bool {
        self.cpa == Decimal::ZERO && self.cr == Decimal::ZERO && self.roas == Decimal::ZERO
    }
}

/// The unit exchanged with the renderer/exporter: market benchmarks plus
/// ordered analysis and recommendation lines (insertion order = display order).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReportRecord {
    pub benchmarks: MarketBenchmarks,

    pub analysis: Vec<String>,

    pub recommendations: Vec<String>,

    /// True when the upstream reply could not be parsed and the whole
    /// record fell back to defaults
    pub defaulted: bool,

    /// Why the record was defaulted (when it was)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_reason: Option<String>,
}

impl ReportRecord {
    /// Whether the record carries nothing worth showing
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_zero() && self.analysis.is_empty() && self.recommendations.is_empty()
    }
}

/// SWOT breakdown used by the market report
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Swot {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

/// A qualitative market report for a business category: estimated size,
/// growth, competitors, SWOT and recommendations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketReport {
    /// Estimated market size (free text, "-" when unknown)
    pub market_size: String,

    /// Compound annual growth rate, percent
    pub growth_rate: Decimal,

    pub top_competitors: Vec<String>,

    pub swot: Swot,

    pub recommendations: Vec<String>,

    /// True when the upstream reply could not be parsed
    pub defaulted: bool,
}

impl Default for MarketReport {
    fn default() -> Self {
        Self {
            market_size: "-".into(),
            growth_rate: Decimal::ZERO,
            top_competitors: Vec::new(),
            swot: Swot::default(),
            recommendations: Vec::new(),
            defaulted: false,
        }
    }
}

/// Full result of one analysis pipeline run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientAnalysis {
    /// The domain label the analysis was contextualized with
    pub field: String,

    pub inputs: ClientInputs,

    pub metrics: ClientMetrics,

    pub report: ReportRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_accepts_equal_orders_and_visits() {
        let inputs = ClientInputs::new(dec!(100), dec!(50), dec!(50), dec!(10));
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_orders_above_visits() {
        let inputs = ClientInputs::new(dec!(100), dec!(100), dec!(50), dec!(10));
        let err = inputs.validate().unwrap_err();
        assert!(matches!(err, InsightError::OrdersExceedVisits { .. }));
    }

    #[test]
    fn test_validate_rejects_negative_budget() {
        let inputs = ClientInputs::new(dec!(-1), dec!(0), dec!(0), dec!(10));
        assert!(matches!(
            inputs.validate().unwrap_err(),
            InsightError::NegativeInput { field: "ad_budget", .. }
        ));
    }

    #[test]
    fn test_empty_record_is_empty() {
        let record = ReportRecord::default();
        assert!(record.is_empty());

        let mut record = ReportRecord::default();
        record.analysis.push("سطر".into());
        assert!(!record.is_empty());
    }
}
