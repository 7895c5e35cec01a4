//! Repository for the `games` and `game_devices` tables.

use gamezone_core::pagination::PageRequest;
use gamezone_core::search::SearchFilter;
use gamezone_core::types::DbId;
use sqlx::PgPool;

use crate::models::game::{CreateGame, Game, GameDetails, GameListItem, UpdateGame};
use crate::repositories::DeviceRepo;

/// Column list for the `games` table.
const COLUMNS: &str = "id, name, description, category_id, cover, created_at, updated_at";

/// Listing projection: game columns, category name, aggregated device ids.
const LIST_COLUMNS: &str = "g.id, g.name, g.description, g.category_id, \
    c.name AS category_name, g.cover, \
    COALESCE(ARRAY_AGG(gd.device_id ORDER BY gd.device_id) \
        FILTER (WHERE gd.device_id IS NOT NULL), '{}') AS device_ids";

/// Provides CRUD and search operations for games and their device associations.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game together with its device associations.
    pub async fn create(pool: &PgPool, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO games (name, description, category_id, cover) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.cover)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_devices_inner(&mut tx, game.id, &input.device_ids).await?;

        tx.commit().await?;
        Ok(game)
    }

    /// Find a game by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a game by ID, enriched with its category name and devices.
    pub async fn find_details(pool: &PgPool, id: DbId) -> Result<Option<GameDetails>, sqlx::Error> {
        let Some(game) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let category_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM categories WHERE id = $1")
                .bind(game.category_id)
                .fetch_optional(pool)
                .await?;
        let devices = DeviceRepo::list_for_game(pool, game.id).await?;

        Ok(Some(GameDetails {
            game,
            category_name,
            devices,
        }))
    }

    /// Total number of games, ignoring any search term.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM games")
            .fetch_one(pool)
            .await
    }

    /// Number of games passing `filter`.
    pub async fn count_matching(pool: &PgPool, filter: &SearchFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) \
             FROM games g \
             LEFT JOIN categories c ON c.id = g.category_id \
             WHERE {}",
            Self::search_predicate(filter)
        );
        sqlx::query_scalar(&query)
            .bind(filter.like_pattern())
            .fetch_one(pool)
            .await
    }

    /// Games passing `filter`, ordered by id.
    ///
    /// With `page` set only that window is returned; without it the whole
    /// filtered set is returned (used by the export).
    pub async fn list_matching(
        pool: &PgPool,
        filter: &SearchFilter,
        page: Option<&PageRequest>,
    ) -> Result<Vec<GameListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} \
             FROM games g \
             LEFT JOIN categories c ON c.id = g.category_id \
             LEFT JOIN game_devices gd ON gd.game_id = g.id \
             WHERE {} \
             GROUP BY g.id, c.name \
             ORDER BY g.id \
             LIMIT $2 OFFSET $3",
            Self::search_predicate(filter)
        );
        sqlx::query_as::<_, GameListItem>(&query)
            .bind(filter.like_pattern())
            .bind(page.map(PageRequest::limit))
            .bind(page.map_or(0, PageRequest::offset))
            .fetch_all(pool)
            .await
    }

    /// Update a game and replace its device associations.
    ///
    /// Returns `None` (and changes nothing) if no row with the given `id`
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE games SET \
                name = $2, \
                description = $3, \
                category_id = $4, \
                cover = COALESCE($5, cover) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.cover)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(game) = game else {
            tx.rollback().await?;
            return Ok(None);
        };

        Self::set_devices_inner(&mut tx, game.id, &input.device_ids).await?;

        tx.commit().await?;
        Ok(Some(game))
    }

    /// Hard-delete a game. Its device associations cascade.
    ///
    /// Returns the deleted row, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("DELETE FROM games WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Device IDs associated with a game, ascending.
    pub async fn device_ids(pool: &PgPool, game_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT device_id FROM game_devices WHERE game_id = $1 ORDER BY device_id",
        )
        .bind(game_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// `WHERE` predicate for `filter`; `$1` is the LIKE pattern or NULL.
    fn search_predicate(filter: &SearchFilter) -> String {
        let op = filter.mode().sql_operator();
        format!("($1::text IS NULL OR g.name {op} $1 OR c.name {op} $1)")
    }

    /// Replace device associations within an existing transaction.
    async fn set_devices_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        game_id: DbId,
        device_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM game_devices WHERE game_id = $1")
            .bind(game_id)
            .execute(&mut **tx)
            .await?;

        for &device_id in device_ids {
            sqlx::query(
                "INSERT INTO game_devices (game_id, device_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(game_id)
            .bind(device_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
