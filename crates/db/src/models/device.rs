//! Device entity model. Devices are seeded by migration and read-only for
//! this service; games reference them through `game_devices`.

use gamezone_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `devices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub name: String,
    /// CSS icon class shown next to the device name.
    pub icon: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
