//! History storage: pluggable, trait-based store for saved analyses.
//!
//! Default: `PgHistoryStore` over the `analyses` table.
//! `AppState` holds an `Arc<dyn HistoryStore>`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::NewAnalysis;
use crate::models::analysis::SavedAnalysis;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn create(&self, analysis: NewAnalysis) -> Result<SavedAnalysis, AppError>;

    /// Most recent first.
    async fn list_recent(
        &self,
        owner_id: &str,
        limit: i64,
    ) -> Result<Vec<SavedAnalysis>, AppError>;

    /// `None` when the id is unknown or belongs to another owner.
    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<SavedAnalysis>, AppError>;
}

pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn create(&self, analysis: NewAnalysis) -> Result<SavedAnalysis, AppError> {
        let saved = sqlx::query_as::<_, SavedAnalysis>(
            r#"
            INSERT INTO analyses
                (id, owner_id, analysis_type, job_title, company,
                 job_description, resume_text, result, match_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&analysis.owner_id)
        .bind(analysis.mode.as_str())
        .bind(&analysis.job_title)
        .bind(&analysis.company)
        .bind(&analysis.job_description)
        .bind(&analysis.resume_text)
        .bind(&analysis.result)
        .bind(analysis.match_score)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Saved {} analysis {} for owner {}",
            saved.analysis_type, saved.id, saved.owner_id
        );
        Ok(saved)
    }

    async fn list_recent(
        &self,
        owner_id: &str,
        limit: i64,
    ) -> Result<Vec<SavedAnalysis>, AppError> {
        Ok(sqlx::query_as::<_, SavedAnalysis>(
            "SELECT * FROM analyses WHERE owner_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<SavedAnalysis>, AppError> {
        Ok(sqlx::query_as::<_, SavedAnalysis>(
            "SELECT * FROM analyses WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}
