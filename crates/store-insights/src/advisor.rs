//! Market Advisor
//!
//! Orchestrates one request/response cycle: builds an Arabic instruction
//! prompt from computed metrics plus context, delegates to the text
//! provider, and pipes whatever comes back through the normalizer.
//!
//! Each call is independent and stateless: no retries, no caching, one
//! blocking provider call per invocation.

use std::sync::Arc;

use advisor_core::{GenerationOptions, TextProvider};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::Result;
use crate::model::{ClientMetrics, MarketBenchmarks, MarketReport, ReportRecord};
use crate::normalize;

/// Saudi-market advisor over any `TextProvider`
pub struct MarketAdvisor {
    provider: Arc<dyn TextProvider>,
    options: GenerationOptions,
}

impl MarketAdvisor {
    pub fn new(provider: Arc<dyn TextProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    /// Full analysis for one client: market benchmarks, point-by-point
    /// comparison, and recommendations, contextualized by the domain label.
    pub async fn analyze(
        &self,
        field: &str,
        metrics: &ClientMetrics,
        orders: Decimal,
        visits: Decimal,
    ) -> Result<ReportRecord> {
        let prompt =
            build_analysis_prompt(field, metrics, orders, visits, Utc::now().date_naive());

        tracing::debug!(field, "requesting market analysis");
        let completion = self.provider.complete(&prompt, &self.options).await?;

        let record = normalize::normalize_analysis(&completion.content);
        if record.is_empty() {
            tracing::warn!(field, "market analysis came back empty");
        }

        Ok(record)
    }

    /// Lighter-weight query: estimated market-average CPA/CR/ROAS only.
    pub async fn benchmarks(&self, field: &str) -> Result<MarketBenchmarks> {
        let prompt = build_benchmarks_prompt(field);

        tracing::debug!(field, "requesting market benchmarks");
        let completion = self.provider.complete(&prompt, &self.options).await?;

        Ok(normalize::normalize_benchmarks(&completion.content))
    }

    /// Qualitative market report for a category: size, growth, competitors,
    /// SWOT and recommendations.
    pub async fn market_report(
        &self,
        category: &str,
        business_type: &str,
        country: &str,
        cities: &[String],
    ) -> Result<MarketReport> {
        let prompt = build_market_report_prompt(category, business_type, country, cities);

        tracing::debug!(category, country, "requesting market report");
        let completion = self.provider.complete(&prompt, &self.options).await?;

        let report = normalize::normalize_market_report(&completion.content);
        if report.defaulted {
            tracing::warn!(category, "market report came back unusable");
        }

        Ok(report)
    }
}

/// Build the full-analysis prompt.
///
/// Client figures use fixed presentation conventions inside the prompt:
/// CPA as SAR to 2 decimals, CR as a percentage to 2 decimals, ROAS as a
/// multiplier to 2 decimals suffixed "x". The implausibility thresholds
/// mentioned in the text are advisory to the upstream model, not enforced
/// in code.
fn build_analysis_prompt(
    field: &str,
    metrics: &ClientMetrics,
    orders: Decimal,
    visits: Decimal,
    today: NaiveDate,
) -> String {
    format!(
        r#"انت خبير تسويق في السعودية.
✅ مسموح فقط باللغة العربية.
❌ ممنوع استخدام أي كلمة أو جملة باللغة الإنجليزية.
✅ إذا ذكرت الاختصارات CPA أو CR أو ROAS، يجب أن تكتب بهذا الشكل:
- تكلفة جذب العميل (CPA)
- معدل التحويل (CR)
- عائد الإنفاق الإعلاني (ROAS)
✅ اجعل الرد منظم في شكل قائمة مرقمة (1، 2، 3 ...)، بجُمل قصيرة ومباشرة.

التاريخ: {today}
المجال: {field}

بيانات العميل:
- تكلفة جذب العميل (CPA) = {cpa:.2} ريال
- معدل التحويل (CR) = {cr:.2}%
- عائد الإنفاق الإعلاني (ROAS) = {roas:.2}x
- الأوردرات = {orders}
- الزيارات = {visits}

اعطني تحليل كامل يتضمن:
1. مؤشرات السوق السعودي الحالية (CPA, CR, ROAS).
2. مقارنة بين بيانات العميل والسوق (أفضل ✅ - أضعف ⚠ - غير منطقي ❌) ويُعرض بشكل مرقم.
3. تحذيرات إذا كانت البيانات غير منطقية (مثلاً CR > 20% أو ROAS > 10x أو زيارات < 100) وتكون أيضاً مرقمة.
4. توصيات عملية قصيرة ومباشرة وتكون في شكل قائمة مرقمة.

النتيجة لازم تكون JSON فقط بالصيغة:
{{"MarketBenchmarks": {{"CPA": 0.0, "CR": 0.0, "ROAS": 0.0}}, "Analysis": ["1. ...", "2. ...", "3. ..."], "Recommendations": ["1. ...", "2. ...", "3. ..."]}}
لا تضف أي نص خارج JSON."#,
        today = today.format("%Y-%m-%d"),
        field = field,
        cpa = metrics.cost_per_acquisition,
        cr = metrics.conversion_rate * dec!(100),
        roas = metrics.return_on_ad_spend,
        orders = orders,
        visits = visits,
    )
}

/// Build the benchmarks-only prompt.
fn build_benchmarks_prompt(field: &str) -> String {
    format!(
        r#"اكتب فقط JSON صالح (بدون أي نص إضافي) لمتوسط مؤشرات السوق السعودي لمجال "{field}".
استخدم هذه البنية:
{{"CPA": 0.0, "CR": 0.0, "ROAS": 0.0}}
جميع القيم أرقام (بدون وحدات أو رموز)."#
    )
}

/// Build the market-report prompt. An empty city list means the whole
/// country.
fn build_market_report_prompt(
    category: &str,
    business_type: &str,
    country: &str,
    cities: &[String],
) -> String {
    let cities_text = if cities.is_empty() {
        format!("كل مدن {country}")
    } else {
        cities.join(", ")
    };

    format!(
        r#"انت باحث تسويق متخصص في السعودية.
✅ مسموح فقط باللغة العربية المبسطة.
❌ ممنوع استخدام أي كلمة أو جملة باللغة الإنجليزية.
✅ لو لازم تذكر مصطلحات عالمية، اكتبها بالعربية متبوعة بالاختصار بين أقواس، مثل:
- معدل النمو السنوي المركب (CAGR)
✅ اجعل كل جزء من التقرير في شكل قائمة مرقمة (1. ... 2. ... 3. ...).
✅ كل نقطة لازم تكون جملة قصيرة ومباشرة (سطر واحد فقط).

اعطني تقرير عن السوق السعودي في مجال "{category}" للفئة "{business_type}"
في دولة {country} ومدن {cities_text}.

يجب أن يتضمن التقرير:
1. حجم السوق (بالريال السعودي أو عدد العملاء).
2. معدل النمو السنوي المركب (CAGR).
3. أقوى 3 منافسين حقيقيين.
4. تحليل SWOT (نقاط القوة، الضعف، الفرص، التهديدات) وكل قسم مرقم.
5. 3 توصيات عملية واضحة ومباشرة.

النتيجة لازم تكون JSON فقط بالصيغة:
{{"MarketSize": "...", "GrowthRate": 0.0, "TopCompetitors": ["...", "...", "..."], "SWOT": {{"Strengths": ["..."], "Weaknesses": ["..."], "Opportunities": ["..."], "Threats": ["..."]}}, "Recommendations": ["...", "...", "..."]}}
لا تكتب أي نص خارج JSON."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_runtime::MockProvider;
    use rust_decimal_macros::dec;

    fn sample_metrics() -> ClientMetrics {
        ClientMetrics {
            cost_per_acquisition: dec!(20),
            conversion_rate: dec!(0.025),
            return_on_ad_spend: dec!(4),
        }
    }

    #[test]
    fn test_analysis_prompt_formatting() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let prompt =
            build_analysis_prompt("Dropshipping - أزياء", &sample_metrics(), dec!(50), dec!(2000), date);

        assert!(prompt.contains("التاريخ: 2026-03-01"));
        assert!(prompt.contains("المجال: Dropshipping - أزياء"));
        assert!(prompt.contains("= 20.00 ريال"));
        assert!(prompt.contains("= 2.50%"));
        assert!(prompt.contains("= 4.00x"));
        assert!(prompt.contains("الأوردرات = 50"));
        assert!(prompt.contains("الزيارات = 2000"));
    }

    #[test]
    fn test_market_report_prompt_city_fallback() {
        let all = build_market_report_prompt("عطور", "B2C", "السعودية", &[]);
        assert!(all.contains("كل مدن السعودية"));

        let some = build_market_report_prompt(
            "عطور",
            "B2C",
            "السعودية",
            &["الرياض".to_string(), "جدة".to_string()],
        );
        assert!(some.contains("الرياض, جدة"));
    }

    #[tokio::test]
    async fn test_analyze_normalizes_reply() {
        let reply = r#"```json
{"MarketBenchmarks": {"CPA": 30, "CR": 0.02, "ROAS": 3},
 "Analysis": ["1. الأداء جيد."],
 "Recommendations": ["1. استمر."]}
```"#;
        let provider = Arc::new(MockProvider::with_reply(reply));
        let advisor = MarketAdvisor::new(provider.clone(), GenerationOptions::default());

        let record = advisor
            .analyze("Private Products", &sample_metrics(), dec!(50), dec!(2000))
            .await
            .unwrap();

        assert!(!record.defaulted);
        assert_eq!(record.benchmarks.cpa, dec!(30));
        assert_eq!(record.analysis.len(), 1);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_degrades_on_garbage_reply() {
        let provider = Arc::new(MockProvider::with_reply("تعذر توليد التحليل"));
        let advisor = MarketAdvisor::new(provider, GenerationOptions::default());

        let record = advisor
            .analyze("Offline Business", &sample_metrics(), dec!(50), dec!(2000))
            .await
            .unwrap();

        assert!(record.defaulted);
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn test_benchmarks_only() {
        let provider = Arc::new(MockProvider::with_reply(
            r#"{"CPA": "40", "CR": "1.8%", "ROAS": 2.2}"#,
        ));
        let advisor = MarketAdvisor::new(provider, GenerationOptions::default());

        let bm = advisor.benchmarks("الكترونيات").await.unwrap();
        assert_eq!(bm.cpa, dec!(40));
        assert_eq!(bm.cr, dec!(1.8));
        assert_eq!(bm.roas, dec!(2.2));
    }
}
