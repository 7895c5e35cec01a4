//! Capability traits over the game store.
//!
//! The listing and export pipeline only needs to read games; the HTTP
//! handlers additionally mutate them and need picker options. Each concern
//! is a separate trait so the pipeline can run against [`MemoryCatalog`] in
//! tests and against [`PgCatalog`] in production.

use async_trait::async_trait;
use gamezone_core::error::CoreError;
use gamezone_core::pagination::PageRequest;
use gamezone_core::search::SearchFilter;
use gamezone_core::types::DbId;

use crate::models::game::{CreateGame, Game, GameDetails, GameListItem, UpdateGame};
use crate::models::select::SelectItem;

pub mod memory;
pub mod pg;
mod service;

pub use memory::MemoryCatalog;
pub use pg::PgCatalog;
pub use service::{export_workbook, list_page, GamePage};

/// Failure of a catalog pipeline call.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Read-only queries over games.
#[async_trait]
pub trait GameReader: Send + Sync {
    /// Number of games regardless of any search term.
    async fn count_games(&self) -> Result<i64, sqlx::Error>;

    /// Number of games passing `filter`.
    async fn count_matching(&self, filter: &SearchFilter) -> Result<i64, sqlx::Error>;

    /// Games passing `filter`, ascending by id, optionally restricted to one
    /// page.
    async fn list_matching(
        &self,
        filter: &SearchFilter,
        page: Option<&PageRequest>,
    ) -> Result<Vec<GameListItem>, sqlx::Error>;

    /// A single game with its category name and devices.
    async fn find_game(&self, id: DbId) -> Result<Option<GameDetails>, sqlx::Error>;
}

/// Mutations on games and their device associations.
#[async_trait]
pub trait GameWriter: Send + Sync {
    async fn create_game(&self, input: &CreateGame) -> Result<Game, sqlx::Error>;

    /// `None` if the game does not exist; nothing is changed in that case.
    async fn update_game(&self, id: DbId, input: &UpdateGame)
        -> Result<Option<Game>, sqlx::Error>;

    /// Returns the deleted game, or `None` if it did not exist.
    async fn delete_game(&self, id: DbId) -> Result<Option<Game>, sqlx::Error>;
}

/// Categories and devices as picker options.
#[async_trait]
pub trait SelectListSource: Send + Sync {
    async fn category_items(&self) -> Result<Vec<SelectItem>, sqlx::Error>;

    async fn device_items(&self) -> Result<Vec<SelectItem>, sqlx::Error>;
}
