//! Shared response envelope types for API handlers.
//!
//! All JSON responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use gamezone_db::models::select::SelectItem;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: page }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Picker options shown alongside the create and edit forms.
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub categories: Vec<SelectItem>,
    pub devices: Vec<SelectItem>,
}
