//! Route definitions for the picker lists.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// ```text
/// GET /categories  -> categories
/// GET /devices     -> devices
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(lookups::categories))
        .route("/devices", get(lookups::devices))
}
