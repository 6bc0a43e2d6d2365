use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::CodeGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable generation backend. Default: `LlmClient`.
    pub generator: Arc<dyn CodeGenerator>,
}
