//! Application State

use std::path::PathBuf;
use std::sync::Arc;

use advisor_core::{GenerationOptions, TextProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Text provider (Gemini, mock, ...)
    pub provider: Arc<dyn TextProvider>,

    /// Generation options shared by all requests
    pub options: GenerationOptions,

    /// Directory report artifacts are written into
    pub export_dir: PathBuf,
}
