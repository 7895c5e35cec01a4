//! Listing and export pipeline.
//!
//! Both paths filter with the same [`SearchFilter`]; the listing then cuts
//! one page out of the filtered set, the export renders all of it.

use gamezone_core::export::{build_games_workbook, GameExportRow};
use gamezone_core::pagination::{PageRequest, PaginationInfo};
use gamezone_core::search::SearchFilter;
use serde::Serialize;

use super::{CatalogError, GameReader};
use crate::models::game::GameListItem;

/// One page of the game listing plus the metadata needed to render pager
/// controls.
#[derive(Debug, Clone, Serialize)]
pub struct GamePage {
    pub games: Vec<GameListItem>,
    pub pagination: PaginationInfo,
    /// The normalized search term, echoed back for the search box.
    pub search_term: Option<String>,
    /// Number of games passing the search filter.
    pub records_filtered: i64,
    /// Number of games in the catalog.
    pub records_total: i64,
}

/// Filter the catalog and return the requested page.
pub async fn list_page<R>(
    reader: &R,
    filter: &SearchFilter,
    page: PageRequest,
) -> Result<GamePage, CatalogError>
where
    R: GameReader + ?Sized,
{
    let records_filtered = reader.count_matching(filter).await?;
    let records_total = if filter.is_identity() {
        records_filtered
    } else {
        reader.count_games().await?
    };
    let games = reader.list_matching(filter, Some(&page)).await?;

    tracing::debug!(
        search_term = filter.term().unwrap_or(""),
        page_number = page.page_number(),
        page_size = page.page_size(),
        records_filtered,
        returned = games.len(),
        "Listed games"
    );

    Ok(GamePage {
        games,
        pagination: PaginationInfo::new(&page, records_filtered),
        search_term: filter.term().map(str::to_string),
        records_filtered,
        records_total,
    })
}

/// Filter the catalog and render the whole filtered set as `.xlsx` bytes.
pub async fn export_workbook<R>(reader: &R, filter: &SearchFilter) -> Result<Vec<u8>, CatalogError>
where
    R: GameReader + ?Sized,
{
    let games = reader.list_matching(filter, None).await?;
    let rows: Vec<GameExportRow> = games.iter().map(GameListItem::export_row).collect();
    let bytes = build_games_workbook(&rows)?;

    tracing::info!(
        search_term = filter.term().unwrap_or(""),
        rows = rows.len(),
        bytes = bytes.len(),
        "Exported games workbook"
    );

    Ok(bytes)
}
