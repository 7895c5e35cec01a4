use std::sync::Arc;

use gamezone_core::search::SearchFilter;
use gamezone_db::catalog::PgCatalog;

use crate::config::ServerConfig;
use crate::covers::CoverStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gamezone_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where uploaded cover images live.
    pub covers: CoverStorage,
}

impl AppState {
    pub fn new(pool: gamezone_db::DbPool, config: ServerConfig) -> Self {
        let covers = CoverStorage::new(config.covers_dir.clone());
        Self {
            pool,
            config: Arc::new(config),
            covers,
        }
    }

    /// Catalog view over the shared pool.
    pub fn catalog(&self) -> PgCatalog {
        PgCatalog::new(self.pool.clone())
    }

    /// Build a search filter using the configured match mode.
    pub fn search_filter(&self, term: Option<&str>) -> SearchFilter {
        SearchFilter::new(term, self.config.search_match)
    }
}
