//! Option lists for form pickers.

use gamezone_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// One `<option>` of a category or device picker.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SelectItem {
    pub value: DbId,
    pub text: String,
}
