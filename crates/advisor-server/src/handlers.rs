//! HTTP Handlers
//!
//! Every entry point funnels into the one analysis pipeline; handlers
//! differ only in input shape and domain label.

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use store_insights::{
    domain_label, report, AnalysisPipeline, BulkRow, BulkRowOutcome, ClientAnalysis,
    ClientInputs, DomainKind, InsightError, MarketAdvisor, MarketBenchmarks, MarketReport,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub provider_connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Business kind: dropshipping, private_products or offline_business
    pub kind: DomainKind,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,

    pub ad_budget: Decimal,
    pub orders: Decimal,
    pub visits: Decimal,
    pub product_price: Decimal,

    /// Write a report artifact alongside the response
    #[serde(default)]
    pub export: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: ClientAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_file: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BenchmarksRequest {
    /// Domain/category label, e.g. "Dropshipping - أزياء"
    pub field: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub rows: Vec<BulkRow>,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub rows: Vec<BulkRowOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct MarketReportRequest {
    pub category: String,
    pub business_type: String,
    pub country: String,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub export: bool,
}

#[derive(Debug, Serialize)]
pub struct MarketReportResponse {
    pub report: MarketReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_file: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn map_error(e: InsightError) -> HandlerError {
    let (status, code) = match &e {
        InsightError::OrdersExceedVisits { .. } | InsightError::NegativeInput { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT")
        }
        InsightError::Provider(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    tracing::error!(error = %e, code, "request failed");
    (
        status,
        Json(ErrorResponse {
            error: e.user_message(),
            code: code.into(),
        }),
    )
}

fn pipeline(state: &AppState) -> AnalysisPipeline {
    AnalysisPipeline::new(MarketAdvisor::new(
        state.provider.clone(),
        state.options.clone(),
    ))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = state.provider.health_check().await.unwrap_or(false);
    let provider = match state.provider.info().await {
        Ok(info) => info.name,
        Err(_) => "unknown".into(),
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider,
        provider_connected,
    })
}

/// Single-client analysis: validate, compute metrics, ask for benchmarks
/// and recommendations
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, HandlerError> {
    let field = domain_label(
        payload.kind,
        payload.category.as_deref(),
        payload.subcategory.as_deref(),
    );
    let inputs = ClientInputs::new(
        payload.ad_budget,
        payload.orders,
        payload.visits,
        payload.product_price,
    );

    let analysis = pipeline(&state).run(&inputs, &field).await.map_err(map_error)?;

    let report_file = if payload.export {
        let path = report::export_analysis(&analysis.report, &field, &state.export_dir)
            .map_err(map_error)?;
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(Json(AnalyzeResponse {
        analysis,
        report_file,
    }))
}

/// Benchmarks-only lookup for a domain label
pub async fn benchmarks(
    State(state): State<AppState>,
    Json(payload): Json<BenchmarksRequest>,
) -> Result<Json<MarketBenchmarks>, HandlerError> {
    let pipeline = pipeline(&state);
    let bm = pipeline
        .advisor()
        .benchmarks(&payload.field)
        .await
        .map_err(map_error)?;
    Ok(Json(bm))
}

/// Bulk analysis over an ordered sequence of rows. Rows are processed
/// strictly one after another; a failing row records its error and the
/// run continues.
pub async fn bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkRequest>,
) -> Json<BulkResponse> {
    let rows = pipeline(&state).run_bulk(&payload.rows).await;
    Json(BulkResponse { rows })
}

/// Qualitative market report for a category
pub async fn market_report(
    State(state): State<AppState>,
    Json(payload): Json<MarketReportRequest>,
) -> Result<Json<MarketReportResponse>, HandlerError> {
    let pipeline = pipeline(&state);

    let report = pipeline
        .advisor()
        .market_report(
            &payload.category,
            &payload.business_type,
            &payload.country,
            &payload.cities,
        )
        .await
        .map_err(map_error)?;

    let report_file = if payload.export {
        let label = format!("{}_{}_{}", payload.category, payload.business_type, payload.country);
        let path = report::export_market_report(&report, &label, &state.export_dir)
            .map_err(map_error)?;
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(Json(MarketReportResponse {
        report,
        report_file,
    }))
}
