pub mod games;
pub mod health;
pub mod lookups;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                  list, create
/// /games/export           spreadsheet download
/// /games/form             create form options
/// /games/{id}             get, update, delete
/// /games/{id}/edit        edit form model
///
/// /categories             category picker items
/// /devices                device picker items
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/games", games::router())
        .merge(lookups::router())
}
