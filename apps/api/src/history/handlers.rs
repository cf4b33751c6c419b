use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::{clamp_limit, NewAnalysis, SaveAnalysisPayload};
use crate::models::analysis::{SavedAnalysis, SavedAnalysisSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub owner_id: Option<String>,
    pub limit: Option<i64>,
}

impl HistoryQuery {
    fn owner_id(&self) -> Result<&str, AppError> {
        self.owner_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation("ownerId is required".to_string()))
    }
}

/// POST /api/v1/analyses
pub async fn handle_save_analysis(
    State(state): State<AppState>,
    Json(payload): Json<SaveAnalysisPayload>,
) -> Result<(StatusCode, Json<SavedAnalysis>), AppError> {
    let analysis = NewAnalysis::try_from(payload)?;
    let saved = state.history.create(analysis).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/analyses?ownerId=..&limit=..
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<SavedAnalysisSummary>>, AppError> {
    let owner_id = params.owner_id()?;
    let rows = state
        .history
        .list_recent(owner_id, clamp_limit(params.limit))
        .await?;
    Ok(Json(rows.into_iter().map(SavedAnalysisSummary::from).collect()))
}

/// GET /api/v1/analyses/:id?ownerId=..
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<SavedAnalysis>, AppError> {
    let owner_id = params.owner_id()?;
    state
        .history
        .get(owner_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}
