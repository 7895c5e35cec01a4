//! Handlers for the `/games` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use gamezone_core::error::CoreError;
use gamezone_core::export::{EXPORT_FILENAME, XLSX_CONTENT_TYPE};
use gamezone_core::game::{FieldError, GameForm};
use gamezone_core::pagination::PageRequest;
use gamezone_core::types::DbId;
use gamezone_db::catalog::{self, GamePage, GameReader, GameWriter, PgCatalog, SelectListSource};
use gamezone_db::models::game::{CreateGame, GameDetails, UpdateGame};
use serde::Serialize;

use crate::error::{AppError, AppResult, InvalidForm};
use crate::forms::{read_game_form, GameSubmission};
use crate::query::{ExportParams, ListGamesParams};
use crate::response::{DataResponse, FormOptions};
use crate::state::AppState;

/// Edit form model: the stored values plus the picker options.
#[derive(Debug, Serialize)]
pub struct GameEditForm {
    pub id: DbId,
    pub form: GameForm,
    pub current_cover: String,
    #[serde(flatten)]
    pub options: FormOptions,
}

async fn form_options_from(catalog: &PgCatalog) -> AppResult<FormOptions> {
    Ok(FormOptions {
        categories: catalog.category_items().await?,
        devices: catalog.device_items().await?,
    })
}

async fn require_game(catalog: &PgCatalog, id: DbId) -> AppResult<GameDetails> {
    catalog
        .find_game(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Game", id }))
}

/// Reject `submission` with the options needed to re-display it.
async fn reject_form(
    catalog: &PgCatalog,
    submission: GameSubmission,
    errors: Vec<FieldError>,
    current_cover: Option<String>,
) -> AppError {
    tracing::debug!(errors = errors.len(), "Rejected game form");
    match form_options_from(catalog).await {
        Ok(options) => InvalidForm {
            errors,
            form: submission.form,
            current_cover,
            options,
        }
        .into(),
        Err(e) => e,
    }
}

/// GET /api/v1/games
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListGamesParams>,
) -> AppResult<Json<DataResponse<GamePage>>> {
    let filter = state.search_filter(params.search_term.as_deref());
    let page = PageRequest::new(params.page_number, params.page_size);
    let result = catalog::list_page(&state.catalog(), &filter, page).await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/games/export
///
/// Downloads every game matching the search term as a spreadsheet.
pub async fn export(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let filter = state.search_filter(params.search_term.as_deref());
    let bytes = catalog::export_workbook(&state.catalog(), &filter).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}

/// GET /api/v1/games/form
pub async fn form_options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<FormOptions>>> {
    let options = form_options_from(&state.catalog()).await?;
    Ok(Json(DataResponse { data: options }))
}

/// POST /api/v1/games
///
/// Multipart form; the cover file is required.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<GameDetails>>)> {
    let catalog = state.catalog();
    let submission = read_game_form(multipart).await?;

    if let Err(errors) = submission.validate(true) {
        return Err(reject_form(&catalog, submission, errors, None).await);
    }
    let (Some(category_id), Some(cover)) = (submission.form.category_id, &submission.cover)
    else {
        return Err(AppError::BadRequest("Category and cover are required".into()));
    };

    let stored = state
        .covers
        .save(&cover.file_name, &cover.bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store cover: {e}")))?;

    let input = CreateGame {
        name: submission.form.name.trim().to_string(),
        description: submission.form.description.clone(),
        category_id,
        cover: stored.clone(),
        device_ids: submission.form.device_ids(),
    };

    let game = match catalog.create_game(&input).await {
        Ok(game) => game,
        Err(e) => {
            state.covers.remove(&stored).await;
            return Err(e.into());
        }
    };
    tracing::info!(game_id = game.id, name = %game.name, "Game created");

    let details = require_game(&catalog, game.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: details })))
}

/// GET /api/v1/games/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GameDetails>>> {
    let details = require_game(&state.catalog(), id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// GET /api/v1/games/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GameEditForm>>> {
    let catalog = state.catalog();
    let details = require_game(&catalog, id).await?;
    let options = form_options_from(&catalog).await?;

    let selected_devices = details.device_ids();
    let game = details.game;
    Ok(Json(DataResponse {
        data: GameEditForm {
            id: game.id,
            form: GameForm {
                name: game.name,
                description: game.description,
                category_id: Some(game.category_id),
                selected_devices,
            },
            current_cover: game.cover,
            options,
        },
    }))
}

/// PUT /api/v1/games/{id}
///
/// Multipart form; an absent cover keeps the current one. Updating a game
/// that does not exist is a bad request.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<GameDetails>>> {
    let catalog = state.catalog();
    let submission = read_game_form(multipart).await?;

    let Some(existing) = catalog.find_game(id).await? else {
        return Err(AppError::BadRequest(format!("Game {id} could not be updated")));
    };
    let old_cover = existing.game.cover;

    if let Err(errors) = submission.validate(false) {
        return Err(reject_form(&catalog, submission, errors, Some(old_cover)).await);
    }
    let Some(category_id) = submission.form.category_id else {
        return Err(AppError::BadRequest("Category is required".into()));
    };

    let new_cover = match &submission.cover {
        Some(cover) => Some(
            state
                .covers
                .save(&cover.file_name, &cover.bytes)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to store cover: {e}")))?,
        ),
        None => None,
    };

    let input = UpdateGame {
        name: submission.form.name.trim().to_string(),
        description: submission.form.description.clone(),
        category_id,
        cover: new_cover.clone(),
        device_ids: submission.form.device_ids(),
    };

    let updated = match catalog.update_game(id, &input).await {
        Ok(Some(game)) => game,
        result => {
            if let Some(stored) = &new_cover {
                state.covers.remove(stored).await;
            }
            return Err(match result {
                Err(e) => e.into(),
                Ok(_) => AppError::BadRequest(format!("Game {id} could not be updated")),
            });
        }
    };

    if new_cover.is_some() {
        state.covers.remove(&old_cover).await;
    }
    tracing::info!(game_id = id, name = %updated.name, "Game updated");

    let details = require_game(&catalog, id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// DELETE /api/v1/games/{id}
///
/// 200 when the game was removed, 400 when there was nothing to remove.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    match state.catalog().delete_game(id).await? {
        Some(game) => {
            state.covers.remove(&game.cover).await;
            tracing::info!(game_id = id, "Game deleted");
            Ok(StatusCode::OK)
        }
        None => Err(AppError::BadRequest(format!("Game {id} could not be deleted"))),
    }
}
