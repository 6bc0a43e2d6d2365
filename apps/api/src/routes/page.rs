//! The upload form served at `/`.

use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::generation::frameworks::SUPPORTED_FRAMEWORKS;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub frameworks: &'a [&'a str],
}

/// GET /
pub async fn index_handler() -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        frameworks: SUPPORTED_FRAMEWORKS,
    };
    let html = template
        .render()
        .map_err(|e| AppError::Unknown(format!("Failed to render upload form: {e}")))?;
    Ok(Html(html))
}
