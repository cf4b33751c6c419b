use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `analyses` table and its owner/recency index if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id              UUID PRIMARY KEY,
            owner_id        TEXT NOT NULL,
            analysis_type   TEXT NOT NULL,
            job_title       TEXT NOT NULL,
            company         TEXT NOT NULL,
            job_description TEXT NOT NULL,
            resume_text     TEXT NOT NULL,
            result          JSONB NOT NULL,
            match_score     INTEGER,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create analyses table")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS analyses_owner_created_idx \
         ON analyses (owner_id, created_at DESC)",
    )
    .execute(pool)
    .await
    .context("Failed to create analyses index")?;

    info!("Database schema ready");
    Ok(())
}
