//! Error Types for Store Insights

use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InsightError>;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("orders ({orders}) exceed visits ({visits})")]
    OrdersExceedVisits { orders: Decimal, visits: Decimal },

    #[error("negative input: {field} = {value}")]
    NegativeInput { field: &'static str, value: Decimal },

    #[error("Provider error: {0}")]
    Provider(#[from] advisor_core::ProviderError),

    #[error("Report error: {0}")]
    Report(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InsightError {
    /// Convert to a user-facing message (Arabic, matching the product surface)
    pub fn user_message(&self) -> String {
        match self {
            InsightError::OrdersExceedVisits { .. } => {
                "عدد الأوردرات لا يمكن أن يكون أكبر من عدد الزيارات.".into()
            }
            InsightError::NegativeInput { .. } => {
                "جميع المدخلات يجب أن تكون أرقاماً غير سالبة.".into()
            }
            InsightError::Provider(e) => e.user_message(),
            _ => "حدث خطأ غير متوقع.".into(),
        }
    }
}
