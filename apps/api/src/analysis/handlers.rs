//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use bytes::Bytes;

use crate::analysis::{AnalysisOutcome, AnalyzePayload};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze
///
/// Runs one of the three analysis modes against a resume and job description.
/// The body is decoded by hand so that a missing credential is reported ahead
/// of any problem with the request itself.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisOutcome>, AppError> {
    state.analyzer.ensure_configured()?;

    let payload: AnalyzePayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;

    let outcome = state.analyzer.handle(payload).await?;
    Ok(Json(outcome))
}
