// Saved-analysis history: the document-store side of the app.
// Owner identity comes from the client's identity provider as an opaque uid.

pub mod handlers;
pub mod store;

use serde::Deserialize;
use serde_json::Value;

use crate::analysis::AnalysisMode;
use crate::errors::AppError;

pub const DEFAULT_HISTORY_LIMIT: i64 = 10;
pub const MAX_HISTORY_LIMIT: i64 = 50;

/// Raw `POST /api/v1/analyses` body.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAnalysisPayload {
    pub owner_id: Option<String>,
    pub analysis_type: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub job_description: Option<String>,
    pub resume_text: Option<String>,
    pub result: Option<Value>,
}

/// A validated record, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
    pub owner_id: String,
    pub mode: AnalysisMode,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
    pub resume_text: String,
    pub result: Value,
    pub match_score: Option<i32>,
}

impl TryFrom<SaveAnalysisPayload> for NewAnalysis {
    type Error = AppError;

    fn try_from(payload: SaveAnalysisPayload) -> Result<Self, Self::Error> {
        let (Some(owner_id), Some(job_title), Some(company)) = (
            trimmed(payload.owner_id),
            trimmed(payload.job_title),
            trimmed(payload.company),
        ) else {
            return Err(AppError::Validation(
                "Owner, job title, and company are required".to_string(),
            ));
        };

        let mode: AnalysisMode = trimmed(payload.analysis_type)
            .ok_or_else(|| AppError::Validation("Analysis type is required".to_string()))?
            .parse()?;

        let result = payload
            .result
            .filter(Value::is_object)
            .ok_or_else(|| AppError::Validation("Analysis result is required".to_string()))?;

        let match_score = result
            .get("matchScore")
            .and_then(Value::as_i64)
            .map(|score| score.clamp(0, 100) as i32);

        Ok(NewAnalysis {
            owner_id,
            mode,
            job_title,
            company,
            job_description: payload.job_description.unwrap_or_default(),
            resume_text: payload.resume_text.unwrap_or_default(),
            result,
            match_score,
        })
    }
}

/// Number of records to return for a history listing.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
