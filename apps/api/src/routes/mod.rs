pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

/// Allowance for multipart boundaries, part headers and the framework field on
/// top of the file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-code",
            post(handlers::handle_generate_code).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
