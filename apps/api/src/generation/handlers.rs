//! Axum route handler for the upload-and-generate endpoint.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate_code, GenerationResult};
use crate::generation::upload::read_upload_form;
use crate::state::AppState;

/// POST /api/generate-code
///
/// Accepts `multipart/form-data` with a `file` part and a `framework` field and
/// returns `{ "text": ... }` with the generated code.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_generate_code(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let multipart = multipart.map_err(|e| AppError::MalformedRequest(e.to_string()))?;

    let request = read_upload_form(
        multipart,
        &state.config.upload_dir,
        state.config.max_upload_bytes,
    )
    .await?;

    let result = generate_code(state.generator.as_ref(), request).await?;

    Ok(Json(result))
}
