//! Response Normalizer
//!
//! Defensive parsing of the upstream model's free-text replies into
//! well-typed records. The upstream is untrusted and occasionally
//! malformed: it may wrap JSON in markdown fences, return `"12%"` where a
//! number was asked for, drop fields, or answer in plain prose. Every
//! function here is total - partial or entirely-missing input yields an
//! all-default record, never an error.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::model::{MarketBenchmarks, MarketReport, ReportRecord, Swot};

/// Outcome of the parse-or-default boundary
#[derive(Debug)]
pub enum Payload {
    /// The reply parsed to a JSON object
    Parsed(Map<String, Value>),

    /// The reply could not be used; downstream fields fall through to
    /// their defaults
    Defaulted(String),
}

/// Parse a raw reply into a JSON object, or explain why it defaulted.
pub fn parse_payload(raw: &str) -> Payload {
    if raw.trim().is_empty() {
        return Payload::Defaulted("empty reply".into());
    }

    let stripped = strip_code_fence(raw);

    match serde_json::from_str::<Value>(stripped) {
        Ok(Value::Object(map)) => Payload::Parsed(map),
        Ok(_) => Payload::Defaulted("reply was not a JSON object".into()),
        Err(_) => Payload::Defaulted("reply was not valid JSON".into()),
    }
}

/// Strip a wrapping triple-backtick fence, including an optional `json`
/// language tag. Models wrap structured output in markdown even when asked
/// not to.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.trim_start();

    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };

    inner.trim()
}

/// Coerce a JSON value to a Decimal.
///
/// Numbers convert directly; strings are parsed after stripping a trailing
/// `%` and surrounding whitespace, so `"12%"` and `"12"` and `12` all mean
/// the same thing. Anything else is zero.
fn coerce_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse()
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Coerce a JSON value to an ordered list of strings. Absent or
/// wrongly-shaped values yield an empty list; non-string elements are
/// skipped.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

/// Scrub a line down to the target language.
///
/// The upstream is instructed to answer in Arabic only but lapses into
/// Latin-alphabet fragments, especially around acronyms. Deletes every
/// ASCII letter, then collapses whitespace runs and trims. A sanitizer,
/// not a translator: the cleaned line is shorter, not corrected.
pub fn scrub_latin(line: &str) -> String {
    let stripped: String = line.chars().filter(|c| !c.is_ascii_alphabetic()).collect();
    stripped.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn benchmarks_from(map: &Map<String, Value>) -> MarketBenchmarks {
    MarketBenchmarks {
        cpa: coerce_decimal(map.get("CPA")),
        cr: coerce_decimal(map.get("CR")),
        roas: coerce_decimal(map.get("ROAS")),
    }
}

/// Normalize a full analysis reply into a `ReportRecord`.
///
/// Expects `{"MarketBenchmarks": {...}, "Analysis": [...],
/// "Recommendations": [...]}`; analysis and recommendation lines go
/// through the language scrub.
pub fn normalize_analysis(raw: &str) -> ReportRecord {
    let (data, reason) = split_payload(raw);

    let benchmarks = match data.get("MarketBenchmarks") {
        Some(Value::Object(mb)) => benchmarks_from(mb),
        _ => MarketBenchmarks::default(),
    };

    let analysis = string_list(data.get("Analysis"))
        .iter()
        .map(|line| scrub_latin(line))
        .collect();
    let recommendations = string_list(data.get("Recommendations"))
        .iter()
        .map(|line| scrub_latin(line))
        .collect();

    ReportRecord {
        benchmarks,
        analysis,
        recommendations,
        defaulted: reason.is_some(),
        default_reason: reason,
    }
}

/// Normalize a benchmarks-only reply: `{"CPA": ..., "CR": ..., "ROAS": ...}`.
pub fn normalize_benchmarks(raw: &str) -> MarketBenchmarks {
    let (data, _) = split_payload(raw);
    benchmarks_from(&data)
}

/// Normalize a market-report reply: market size, growth rate, competitors,
/// SWOT and recommendations. No language scrub here.
pub fn normalize_market_report(raw: &str) -> MarketReport {
    let (data, reason) = split_payload(raw);

    let market_size = match data.get("MarketSize") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Null) | None => "-".into(),
        Some(other) => other.to_string(),
    };

    let swot = match data.get("SWOT") {
        Some(Value::Object(sw)) => Swot {
            strengths: string_list(sw.get("Strengths")),
            weaknesses: string_list(sw.get("Weaknesses")),
            opportunities: string_list(sw.get("Opportunities")),
            threats: string_list(sw.get("Threats")),
        },
        _ => Swot::default(),
    };

    MarketReport {
        market_size,
        growth_rate: coerce_decimal(data.get("GrowthRate")),
        top_competitors: string_list(data.get("TopCompetitors")),
        swot,
        recommendations: string_list(data.get("Recommendations")),
        defaulted: reason.is_some(),
    }
}

fn split_payload(raw: &str) -> (Map<String, Value>, Option<String>) {
    match parse_payload(raw) {
        Payload::Parsed(map) => (map, None),
        Payload::Defaulted(reason) => {
            tracing::debug!(%reason, "upstream reply defaulted");
            (Map::new(), Some(reason))
        }
    }
}
