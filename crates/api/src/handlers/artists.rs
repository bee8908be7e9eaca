//! Handlers for the `/artists` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chartdesk_core::catalog::normalize_artist_name;
use chartdesk_core::error::CoreError;
use chartdesk_core::types::DbId;
use chartdesk_db::models::artist::ArtistInput;
use chartdesk_db::repositories::ArtistRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/artists?q=
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let artists = ArtistRepo::list(&state.pool, &params.q).await?;
    Ok(Json(DataResponse { data: artists }))
}

/// POST /api/v1/artists
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ArtistInput>,
) -> AppResult<impl IntoResponse> {
    let name = normalize_artist_name(&input.name)?;
    let artist = ArtistRepo::create(&state.pool, &name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: artist })))
}

/// PUT /api/v1/artists/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ArtistInput>,
) -> AppResult<impl IntoResponse> {
    let name = normalize_artist_name(&input.name)?;
    let artist = ArtistRepo::rename(&state.pool, id, &name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artist",
            id,
        }))?;
    Ok(Json(DataResponse { data: artist }))
}
