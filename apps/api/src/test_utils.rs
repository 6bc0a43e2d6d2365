//! Shared helpers for unit tests: multipart body building, upload fixtures and
//! a recording `CodeGenerator` double.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use serde_json::Value;

use crate::config::Config;
use crate::generation::generator::CodeGenerator;
use crate::generation::upload::{TempUpload, UploadRequest};
use crate::llm_client::LlmError;
use crate::routes::build_router;
use crate::state::AppState;

const BOUNDARY: &str = "design2code-test-boundary";

/// One part of a hand-built multipart body.
pub struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    content_type: Option<&'a str>,
    data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }

    pub fn file(name: &'a str, file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }
}

/// Encodes `parts` as `multipart/form-data`, returning the content type header and body.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

/// Writes `bytes` to a temp file in `dir` and wraps it as a validated upload.
pub fn upload_request(dir: &Path, bytes: &[u8], framework: &str) -> UploadRequest {
    let named = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(dir)
        .unwrap();
    std::fs::write(named.path(), bytes).unwrap();
    UploadRequest {
        file: TempUpload::new(
            named,
            Some("design.png".to_string()),
            Some("image/png".to_string()),
            bytes.len(),
        ),
        framework: framework.to_string(),
    }
}

enum Outcome {
    Text(String),
    Api { status: u16, body: Value },
    Transport(String),
}

/// Test double for the generation capability. Records every prompt it sees.
#[derive(Clone)]
pub struct RecordingGenerator {
    outcome: Arc<Outcome>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingGenerator {
    fn with(outcome: Outcome) -> Self {
        Self {
            outcome: Arc::new(outcome),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with(Outcome::Text(text.to_string()))
    }

    pub fn failing_api(status: u16, body: Value) -> Self {
        Self::with(Outcome::Api { status, body })
    }

    pub fn failing_transport(message: &str) -> Self {
        Self::with(Outcome::Transport(message.to_string()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodeGenerator for RecordingGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.outcome.as_ref() {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::Api { status, body } => Err(LlmError::Api {
                status: *status,
                body: body.clone(),
            }),
            Outcome::Transport(message) => Err(LlmError::Transport(message.clone())),
        }
    }
}

pub fn test_config(upload_dir: &Path, max_upload_bytes: usize) -> Config {
    Config {
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes,
        request_timeout_secs: 5,
    }
}

/// Full application router backed by `generator`.
pub fn test_app(
    generator: RecordingGenerator,
    upload_dir: &Path,
    max_upload_bytes: usize,
) -> Router {
    build_router(AppState {
        config: test_config(upload_dir, max_upload_bytes),
        generator: Arc::new(generator),
    })
}
