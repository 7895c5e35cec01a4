//! Repository for the `devices` table.

use gamezone_core::types::DbId;
use sqlx::PgPool;

use crate::models::device::Device;
use crate::models::select::SelectItem;

/// Column list for the `devices` table (prefixed for JOIN queries).
const COLUMNS: &str = "d.id, d.name, d.icon, d.created_at, d.updated_at";

/// Read access to devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// List all devices ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices d ORDER BY d.name");
        sqlx::query_as::<_, Device>(&query).fetch_all(pool).await
    }

    /// Devices as picker options, ordered by name.
    pub async fn list_select_items(pool: &PgPool) -> Result<Vec<SelectItem>, sqlx::Error> {
        sqlx::query_as::<_, SelectItem>(
            "SELECT id AS value, name AS text FROM devices ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Devices associated with a game, ordered by id.
    pub async fn list_for_game(pool: &PgPool, game_id: DbId) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} \
             FROM devices d \
             JOIN game_devices gd ON gd.device_id = d.id \
             WHERE gd.game_id = $1 \
             ORDER BY d.id"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }
}
