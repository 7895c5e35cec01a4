//! Handlers for the category and device picker lists.

use axum::extract::State;
use axum::Json;
use gamezone_db::catalog::SelectListSource;
use gamezone_db::models::select::SelectItem;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectItem>>>> {
    let items = state.catalog().category_items().await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/devices
pub async fn devices(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<SelectItem>>>> {
    let items = state.catalog().device_items().await?;
    Ok(Json(DataResponse { data: items }))
}
