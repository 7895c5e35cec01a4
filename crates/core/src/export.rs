//! Spreadsheet export of the game catalog.
//!
//! Produces a single-sheet `.xlsx` workbook: a `Name | Category` header row
//! followed by one row per game, in the order given. The workbook lives only
//! for the duration of [`build_games_workbook`].

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::CoreError;
use crate::types::DbId;

/// Worksheet name inside the exported workbook.
pub const EXPORT_SHEET_NAME: &str = "Games";

/// Header labels written to row 1.
pub const EXPORT_HEADERS: [&str; 2] = ["Name", "Category"];

/// File name offered to the browser.
pub const EXPORT_FILENAME: &str = "Games.xlsx";

/// MIME type of `.xlsx` files.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One game as it appears in the export.
///
/// `category_name` is `None` when the game's category could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameExportRow {
    pub id: DbId,
    pub name: String,
    pub category_name: Option<String>,
}

/// Render `rows` into `.xlsx` bytes.
///
/// Fails without producing any output if a row has no category name.
pub fn build_games_workbook(rows: &[GameExportRow]) -> Result<Vec<u8>, CoreError> {
    if let Some(orphan) = rows.iter().find(|r| r.category_name.is_none()) {
        return Err(CoreError::Internal(format!(
            "Game {} has no resolvable category; export aborted",
            orphan.id
        )));
    }

    write_workbook(rows)
        .map_err(|e| CoreError::Internal(format!("Spreadsheet export failed: {e}")))
}

fn write_workbook(rows: &[GameExportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, label) in (0u16..).zip(EXPORT_HEADERS) {
        sheet.write_string_with_format(0, col, label, &header_format)?;
    }

    for (row, game) in (1u32..).zip(rows) {
        sheet.write_string(row, 0, &game.name)?;
        sheet.write_string(row, 1, game.category_name.as_deref().unwrap_or_default())?;
    }

    workbook.save_to_buffer()
}
