//! PostgreSQL implementation of the catalog traits, delegating to the
//! repositories.

use async_trait::async_trait;
use gamezone_core::pagination::PageRequest;
use gamezone_core::search::SearchFilter;
use gamezone_core::types::DbId;
use sqlx::PgPool;

use super::{GameReader, GameWriter, SelectListSource};
use crate::models::game::{CreateGame, Game, GameDetails, GameListItem, UpdateGame};
use crate::models::select::SelectItem;
use crate::repositories::{CategoryRepo, DeviceRepo, GameRepo};

/// Catalog backed by a connection pool. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameReader for PgCatalog {
    async fn count_games(&self) -> Result<i64, sqlx::Error> {
        GameRepo::count(&self.pool).await
    }

    async fn count_matching(&self, filter: &SearchFilter) -> Result<i64, sqlx::Error> {
        GameRepo::count_matching(&self.pool, filter).await
    }

    async fn list_matching(
        &self,
        filter: &SearchFilter,
        page: Option<&PageRequest>,
    ) -> Result<Vec<GameListItem>, sqlx::Error> {
        GameRepo::list_matching(&self.pool, filter, page).await
    }

    async fn find_game(&self, id: DbId) -> Result<Option<GameDetails>, sqlx::Error> {
        GameRepo::find_details(&self.pool, id).await
    }
}

#[async_trait]
impl GameWriter for PgCatalog {
    async fn create_game(&self, input: &CreateGame) -> Result<Game, sqlx::Error> {
        GameRepo::create(&self.pool, input).await
    }

    async fn update_game(
        &self,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        GameRepo::update(&self.pool, id, input).await
    }

    async fn delete_game(&self, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        GameRepo::delete(&self.pool, id).await
    }
}

#[async_trait]
impl SelectListSource for PgCatalog {
    async fn category_items(&self) -> Result<Vec<SelectItem>, sqlx::Error> {
        CategoryRepo::list_select_items(&self.pool).await
    }

    async fn device_items(&self) -> Result<Vec<SelectItem>, sqlx::Error> {
        DeviceRepo::list_select_items(&self.pool).await
    }
}
