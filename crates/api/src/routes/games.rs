//! Route definitions for the `/games` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use gamezone_core::game::MAX_COVER_SIZE_BYTES;

use crate::handlers::games;
use crate::state::AppState;

/// Headroom over the cover limit for the text fields and multipart framing,
/// so oversized covers reach validation instead of failing as a body error.
const FORM_BODY_LIMIT: usize = 4 * MAX_COVER_SIZE_BYTES;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /export        -> export
/// GET    /form          -> form_options
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /{id}/edit     -> edit_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list).post(games::create))
        .route("/export", get(games::export))
        .route("/form", get(games::form_options))
        .route(
            "/{id}",
            get(games::get_by_id)
                .put(games::update)
                .delete(games::delete),
        )
        .route("/{id}/edit", get(games::edit_form))
        .layer(DefaultBodyLimit::max(FORM_BODY_LIMIT))
}
