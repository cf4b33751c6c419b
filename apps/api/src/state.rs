use std::sync::Arc;

use crate::analysis::orchestrator::Analyzer;
use crate::history::store::HistoryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    /// Pluggable saved-analysis store. Default: PgHistoryStore.
    pub history: Arc<dyn HistoryStore>,
}
