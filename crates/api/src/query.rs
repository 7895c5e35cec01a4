//! Query parameter types for the game listing and export.
//!
//! Both snake_case and camelCase spellings are accepted so existing
//! clients keep working.

use serde::{Deserialize, Deserializer};

/// `GET /games?search_term=&page_number=&page_size=`.
///
/// Values are clamped by `PageRequest::new`, so nothing is rejected here:
/// blank or non-numeric page values fall back to the defaults. Sending the
/// same field under both spellings (`searchTerm` and `search_term`) is a
/// duplicate field and rejected with 400.
#[derive(Debug, Default, Deserialize)]
pub struct ListGamesParams {
    #[serde(alias = "searchTerm")]
    pub search_term: Option<String>,
    #[serde(alias = "pageNumber", default, deserialize_with = "lenient_i64")]
    pub page_number: Option<i64>,
    #[serde(alias = "pageSize", default, deserialize_with = "lenient_i64")]
    pub page_size: Option<i64>,
}

/// `GET /games/export?search_term=`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    #[serde(alias = "searchTerm")]
    pub search_term: Option<String>,
}

/// Read an optional integer, treating blank or unparsable input as absent.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}
