//! Report Exporter
//!
//! Renders result records to a Markdown report artifact. All presentation
//! concerns live here: rounding to 2 decimals, percentage scaling, units
//! and layout. The records themselves carry unrounded raw ratios.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;

use crate::error::Result;
use crate::model::{MarketReport, ReportRecord};

/// Build a report file name, e.g. `AI_Report_Dropshipping - أزياء_2026-08-06.md`.
pub fn report_filename(prefix: &str, label: &str, date: NaiveDate) -> String {
    format!("{}_{}_{}.md", prefix, label, date.format("%Y-%m-%d"))
}

/// Render a client analysis record as a Markdown document.
pub fn render_analysis_report(record: &ReportRecord) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# تقرير السوق (تحليل آلي)");
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## مؤشرات السوق");
    let bm = &record.benchmarks;
    let _ = writeln!(doc, "- CPA (تكلفة الاكتساب) = {:.2} ريال", bm.cpa);
    let _ = writeln!(doc, "- CR (معدل التحويل) = {:.2}%", bm.cr * dec!(100));
    let _ = writeln!(doc, "- ROAS (العائد على الإعلان) = {:.2}x", bm.roas);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## التحليل");
    for line in &record.analysis {
        let _ = writeln!(doc, "- {}", line);
    }
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## التوصيات العملية");
    for rec in &record.recommendations {
        let _ = writeln!(doc, "- {}", rec);
    }

    if record.is_empty() {
        let _ = writeln!(doc);
        let _ = writeln!(doc, "⚠ لم نتمكن من جلب تحليل السوق.");
    }

    doc
}

/// Render a market report as a Markdown document.
pub fn render_market_report(report: &MarketReport) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# تقرير السوق");
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## حجم السوق (تقديري)");
    let _ = writeln!(doc, "{}", report.market_size);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## معدل النمو السنوي (CAGR)");
    let _ = writeln!(doc, "{:.2}%", report.growth_rate);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## أقوى المنافسين في السعودية");
    write_numbered(&mut doc, &report.top_competitors);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## تحليل SWOT");
    for (title, lines) in [
        ("نقاط القوة", &report.swot.strengths),
        ("نقاط الضعف", &report.swot.weaknesses),
        ("الفرص", &report.swot.opportunities),
        ("التهديدات", &report.swot.threats),
    ] {
        let _ = writeln!(doc, "### {}", title);
        write_bullets(&mut doc, lines);
    }
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## التوصيات");
    write_bullets(&mut doc, &report.recommendations);

    doc
}

fn write_bullets(doc: &mut String, lines: &[String]) {
    if lines.is_empty() {
        let _ = writeln!(doc, "-");
        return;
    }
    for line in lines {
        let _ = writeln!(doc, "- {}", line);
    }
}

fn write_numbered(doc: &mut String, lines: &[String]) {
    if lines.is_empty() {
        let _ = writeln!(doc, "-");
        return;
    }
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(doc, "{}. {}", i + 1, line);
    }
}

/// Write a client analysis report into `dir`, returning the file path.
pub fn export_analysis(record: &ReportRecord, label: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_filename("AI_Report", label, Utc::now().date_naive()));
    fs::write(&path, render_analysis_report(record))?;
    tracing::info!(path = %path.display(), "analysis report written");
    Ok(path)
}

/// Write a market report into `dir`, returning the file path.
pub fn export_market_report(report: &MarketReport, label: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_filename("Market_Report", label, Utc::now().date_naive()));
    fs::write(&path, render_market_report(report))?;
    tracing::info!(path = %path.display(), "market report written");
    Ok(path)
}
