//! Handlers for a user's own charts (`/charts/{category}`).
//!
//! Every handler scopes its work to the authenticated user and the category
//! in the path. Writes that reshuffle the list go through `ChartRepo`, which
//! runs them as a single locked transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chartdesk_core::category::Category;
use chartdesk_core::commands::{
    AddExistingTrackCommand, AddTrackCommand, ImportCommand, MoveCommand, ReorderCommand,
    SubmitCommand,
};
use chartdesk_db::repositories::{ChartRepo, ListEntryRepo, TrackRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `GET /charts/{category}/import`.
#[derive(Debug, Serialize)]
pub struct ImportStatus {
    pub can_import: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/charts/{category}/entries
///
/// The caller's draft list with per-entry completeness and `can_submit`.
pub async fn list_entries(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let scope = user.scope(category.parse::<Category>()?);
    let list = ChartRepo::draft_list(&state.pool, scope, state.config.chart_capacity).await?;
    Ok(Json(DataResponse { data: list }))
}

/// POST /api/v1/charts/{category}/entries
///
/// Add a track by title, reusing the catalog track when the title exists.
pub async fn add_track(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(input): Json<AddTrackCommand>,
) -> AppResult<impl IntoResponse> {
    let scope = user.scope(category.parse::<Category>()?);
    input.validate()?;
    let entry = ListEntryRepo::add_track(&state.pool, scope, &input.title).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// POST /api/v1/charts/{category}/entries/existing
pub async fn add_existing_track(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(input): Json<AddExistingTrackCommand>,
) -> AppResult<impl IntoResponse> {
    let scope = user.scope(category.parse::<Category>()?);
    let entry = ListEntryRepo::add_existing_track(&state.pool, scope, input.track_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/charts/{category}/entries/order
///
/// Replace the draft order. `entry_ids` must list every draft exactly once.
pub async fn reorder(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(input): Json<ReorderCommand>,
) -> AppResult<impl IntoResponse> {
    let scope = user.scope(category.parse::<Category>()?);
    input.validate()?;
    let positions = ChartRepo::reorder(&state.pool, scope, &input).await?;
    Ok(Json(DataResponse { data: positions }))
}

/// POST /api/v1/charts/{category}/entries/move
pub async fn move_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(input): Json<MoveCommand>,
) -> AppResult<impl IntoResponse> {
    let scope = user.scope(category.parse::<Category>()?);
    let positions = ChartRepo::move_entry(&state.pool, scope, input).await?;
    Ok(Json(DataResponse { data: positions }))
}

/// GET /api/v1/charts/{category}/tracks?q=
pub async fn search_tracks(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let category: Category = category.parse()?;
    let found = TrackRepo::search(&state.pool, category, &params.q).await?;
    Ok(Json(DataResponse { data: found }))
}

/// POST /api/v1/charts/{category}/submit
pub async fn submit(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let cmd = SubmitCommand {
        scope: user.scope(category.parse::<Category>()?),
        capacity: state.config.chart_capacity,
    };
    let plan = ChartRepo::submit(&state.pool, cmd).await?;
    Ok(Json(DataResponse { data: plan }))
}

/// GET /api/v1/charts/{category}/import
pub async fn import_status(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let scope = user.scope(category.parse::<Category>()?);
    let can_import = ChartRepo::can_import(&state.pool, scope).await?;
    Ok(Json(DataResponse {
        data: ImportStatus { can_import },
    }))
}

/// POST /api/v1/charts/{category}/import
///
/// Recall submitted entries to the top of the draft list.
pub async fn import(
    user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let cmd = ImportCommand {
        scope: user.scope(category.parse::<Category>()?),
    };
    let plan = ChartRepo::import(&state.pool, cmd).await?;
    Ok(Json(DataResponse { data: plan }))
}
