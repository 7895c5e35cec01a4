//! Game entity model and DTOs.
//!
//! A game belongs to one category and is associated with devices through
//! the `game_devices` junction table. The game side owns the association:
//! create and update replace the whole device set.

use gamezone_core::export::GameExportRow;
use gamezone_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::device::Device;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    /// Stored file name of the cover image.
    pub cover: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A game as shown in the listing: joined with its category name and the
/// ids of its devices.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct GameListItem {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    /// `None` if the category row is missing.
    pub category_name: Option<String>,
    pub cover: String,
    pub device_ids: Vec<DbId>,
}

impl GameListItem {
    pub fn export_row(&self) -> GameExportRow {
        GameExportRow {
            id: self.id,
            name: self.name.clone(),
            category_name: self.category_name.clone(),
        }
    }
}

/// A game enriched with its category name and full device records.
#[derive(Debug, Clone, Serialize)]
pub struct GameDetails {
    #[serde(flatten)]
    pub game: Game,
    pub category_name: Option<String>,
    pub devices: Vec<Device>,
}

impl GameDetails {
    pub fn device_ids(&self) -> Vec<DbId> {
        self.devices.iter().map(|d| d.id).collect()
    }
}

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct CreateGame {
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    pub cover: String,
    /// Device IDs to associate with this game.
    pub device_ids: Vec<DbId>,
}

/// DTO for updating an existing game.
///
/// All text fields are replaced; the device set is replaced as a whole.
#[derive(Debug, Clone)]
pub struct UpdateGame {
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    /// If `Some`, replaces the stored cover. If `None`, leaves it unchanged.
    pub cover: Option<String>,
    pub device_ids: Vec<DbId>,
}
