//! Multipart parsing for the upload form.
//!
//! The `file` part is streamed into a temporary file under the upload directory,
//! checking the size limit chunk by chunk so oversized uploads are never buffered.
//! The temporary file belongs to a [`TempUpload`] and is removed when that value
//! is dropped, whichever way the request ends.

use std::path::Path;

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::errors::AppError;

pub const FILE_FIELD: &str = "file";
pub const FRAMEWORK_FIELD: &str = "framework";

const MISSING_INPUT: &str = "File or framework not provided";

/// A request-scoped uploaded file on local disk.
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

impl TempUpload {
    pub fn new(
        file: NamedTempFile,
        file_name: Option<String>,
        content_type: Option<String>,
        size: usize,
    ) -> Self {
        Self {
            file,
            file_name,
            content_type,
            size,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the whole upload and returns its standard base64 encoding.
    pub async fn read_base64(&self) -> Result<String, AppError> {
        let bytes = tokio::fs::read(self.path()).await?;
        Ok(STANDARD.encode(bytes))
    }

    /// Removes the file now, reporting failures instead of swallowing them as `Drop` does.
    pub fn discard(self) {
        let path = self.path().display().to_string();
        match self.file.close() {
            Ok(()) => debug!("Removed temporary upload {path}"),
            Err(e) => warn!("Failed to remove temporary upload {path}: {e}"),
        }
    }
}

/// A validated upload: a non-empty file plus a non-blank framework label.
#[derive(Debug)]
pub struct UploadRequest {
    pub file: TempUpload,
    pub framework: String,
}

/// Parses and validates the multipart body of `POST /api/generate-code`.
///
/// Unknown fields are skipped; a repeated field replaces the earlier value.
pub async fn read_upload_form(
    mut multipart: Multipart,
    upload_dir: &Path,
    max_upload_bytes: usize,
) -> Result<UploadRequest, AppError> {
    let mut file: Option<TempUpload> = None;
    let mut framework: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to parse multipart data", max_upload_bytes))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            FILE_FIELD => {
                file = Some(stream_to_temp_file(field, upload_dir, max_upload_bytes).await?);
            }
            FRAMEWORK_FIELD => {
                let value = field.text().await.map_err(|e| {
                    multipart_error(e, "Failed to read framework field", max_upload_bytes)
                })?;
                framework = Some(value.trim().to_string());
            }
            other => debug!("Ignoring unexpected multipart field '{other}'"),
        }
    }

    let file = file.filter(|f| f.size > 0);
    let framework = framework.filter(|f| !f.is_empty());

    match (file, framework) {
        (Some(file), Some(framework)) => Ok(UploadRequest { file, framework }),
        _ => Err(AppError::MissingInput(MISSING_INPUT.to_string())),
    }
}

/// The router's body limit surfaces as a multipart read error; report it as
/// an oversized upload rather than a malformed one.
fn multipart_error(err: MultipartError, context: &str, max_upload_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge {
            limit: max_upload_bytes,
        }
    } else {
        AppError::MalformedRequest(format!("{context}: {err}"))
    }
}

async fn stream_to_temp_file(
    mut field: Field<'_>,
    upload_dir: &Path,
    max_upload_bytes: usize,
) -> Result<TempUpload, AppError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    let suffix = file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let named = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile_in(upload_dir)?;
    let mut writer = tokio::fs::File::from_std(named.as_file().try_clone()?);

    let mut size = 0usize;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, "Failed to read file chunk", max_upload_bytes))?
    {
        size += chunk.len();
        if size > max_upload_bytes {
            // `named` is dropped on return, which deletes the partial file.
            return Err(AppError::PayloadTooLarge {
                limit: max_upload_bytes,
            });
        }
        writer.write_all(&chunk).await?;
    }
    writer.flush().await?;

    Ok(TempUpload::new(named, file_name, content_type, size))
}
