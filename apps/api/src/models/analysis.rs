use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted analysis. Rows are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysis {
    pub id: Uuid,
    pub owner_id: String,
    pub analysis_type: String,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
    pub resume_text: String,
    pub result: Value,
    pub match_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// List view of a saved analysis, without the inputs and full result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysisSummary {
    pub id: Uuid,
    pub analysis_type: String,
    pub job_title: String,
    pub company: String,
    pub match_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<SavedAnalysis> for SavedAnalysisSummary {
    fn from(row: SavedAnalysis) -> Self {
        Self {
            id: row.id,
            analysis_type: row.analysis_type,
            job_title: row.job_title,
            company: row.company,
            match_score: row.match_score,
            created_at: row.created_at,
        }
    }
}
