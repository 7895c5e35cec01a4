//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::models::category::Category;
use crate::models::select::SelectItem;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Read access to categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Categories as picker options, ordered by name.
    pub async fn list_select_items(pool: &PgPool) -> Result<Vec<SelectItem>, sqlx::Error> {
        sqlx::query_as::<_, SelectItem>(
            "SELECT id AS value, name AS text FROM categories ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }
}
