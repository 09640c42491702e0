//! Store Advisor HTTP Server
//!
//! Axum-based server exposing the store-performance analysis pipeline:
//! single-client analysis, benchmarks-only lookup, bulk rows and market
//! reports.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::{GenerationOptions, TextProvider};
use advisor_runtime::{GeminiProvider, MockProvider};

use crate::handlers::{analyze, benchmarks, bulk, health_check, market_report};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize text provider
    let provider: Arc<dyn TextProvider> = if std::env::var("PROVIDER").as_deref() == Ok("mock") {
        tracing::warn!("⚠ Using mock provider (PROVIDER=mock)");
        Arc::new(MockProvider::new())
    } else {
        match GeminiProvider::from_env() {
            Ok(p) => Arc::new(p),
            Err(e) => {
                tracing::warn!("⚠ Gemini not configured ({}) - using mock provider", e);
                tracing::warn!("  Set GEMINI_API_KEY in .env to enable live analysis");
                Arc::new(MockProvider::new())
            }
        }
    };

    // Verify upstream connection
    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Text provider reachable"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Text provider not reachable - analysis calls will fail");
        }
    }

    let mut options = GenerationOptions::default();
    if let Ok(model) = std::env::var("GEMINI_MODEL") {
        options.model = model;
    }

    // Report artifacts directory
    let export_dir = std::path::PathBuf::from(
        std::env::var("REPORT_DIR").unwrap_or_else(|_| "reports".into()),
    );
    std::fs::create_dir_all(&export_dir)?;

    // Build application state
    let app_state = AppState {
        provider,
        options,
        export_dir,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Analysis API
        .route("/api/analyze", post(analyze))
        .route("/api/benchmarks", post(benchmarks))
        .route("/api/bulk", post(bulk))
        .route("/api/market-report", post(market_report))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 store advisor server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  POST /api/analyze        - Analyze one client");
    tracing::info!("  POST /api/benchmarks     - Market benchmarks only");
    tracing::info!("  POST /api/bulk           - Analyze an ordered row sequence");
    tracing::info!("  POST /api/market-report  - Qualitative market report");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
