//! Code generation — turns a validated upload into generated code text.
//!
//! Flow: read temp file → base64 → compose prompt → CodeGenerator → text.
//!
//! `AppState` holds an `Arc<dyn CodeGenerator>`; production wires in
//! `LlmClient`, tests wire in a recording double.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::prompts::compose_prompt;
use crate::generation::upload::UploadRequest;
use crate::llm_client::{LlmClient, LlmError};

/// Successful generation result, serialized as the 200 response body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The external text-generation capability. Implement this to swap backends
/// without touching the handler.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl CodeGenerator for LlmClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.call_text(prompt).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one upload through the generator.
///
/// Consumes the request so the temporary file is released on every return path:
/// explicitly after a successful call, by `Drop` otherwise.
pub async fn generate_code(
    generator: &dyn CodeGenerator,
    request: UploadRequest,
) -> Result<GenerationResult, AppError> {
    let UploadRequest { file, framework } = request;

    info!(
        file_name = ?file.file_name,
        content_type = ?file.content_type,
        size = file.size,
        "File uploaded"
    );
    info!(framework = %framework, "Framework selected");

    let encoded = file.read_base64().await?;
    let prompt = compose_prompt(&framework, &encoded);
    drop(encoded);

    let text = generator.generate_text(&prompt).await?;

    info!(chars = text.len(), "Generated text");
    debug!("Generated text: {text}");

    file.discard();

    Ok(GenerationResult { text })
}
