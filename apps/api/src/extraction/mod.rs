//! PDF resume text extraction.
//!
//! `pdf-extract` is synchronous and CPU-bound, so extraction runs on the
//! blocking pool. A panic inside the parser is reported like any other
//! unreadable file.

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;

/// Upload cap for `POST /api/v1/resume/extract`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const UNREADABLE_PDF_MESSAGE: &str = "Error reading PDF file. Please try a different file.";
pub const NO_TEXT_MESSAGE: &str =
    "Could not extract text from PDF. Please ensure it's a text-based PDF.";
pub const TOO_LARGE_MESSAGE: &str = "File is too large. The maximum upload size is 10 MB.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub file_name: String,
    pub text: String,
    pub character_count: usize,
}

/// Returns the text of every page, in page order.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| {
        warn!("PDF extraction task failed: {e}");
        AppError::Validation(UNREADABLE_PDF_MESSAGE.to_string())
    })?
    .map_err(|e| {
        warn!("PDF extraction error: {e}");
        AppError::Validation(UNREADABLE_PDF_MESSAGE.to_string())
    })?;

    ensure_text_extracted(text)
}

/// Scanned or image-only PDFs parse fine but yield nothing useful.
pub fn ensure_text_extracted(text: String) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(NO_TEXT_MESSAGE.to_string()));
    }
    Ok(text)
}

/// Bodies cut off by the upload cap are 413; any other multipart failure is 400.
fn upload_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Rejected upload over {MAX_UPLOAD_BYTES} bytes");
        return AppError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string());
    }
    AppError::Validation(format!("{context}: {e}"))
}

/// POST /api/v1/resume/extract
///
/// Multipart upload with the PDF in a `file` field.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Invalid multipart body", e))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| upload_error("Invalid file upload", e))?;

        let text = extract_pdf_text(data).await?;
        info!(
            "Extracted {} characters from {}",
            text.chars().count(),
            file_name
        );

        return Ok(Json(ExtractResponse {
            file_name,
            character_count: text.chars().count(),
            text,
        }));
    }

    Err(AppError::Validation(
        "A PDF file is required in the 'file' field".to_string(),
    ))
}
