//! Handlers for the `/mixes` catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chartdesk_core::catalog::normalize_mix_title;
use chartdesk_core::error::CoreError;
use chartdesk_core::types::DbId;
use chartdesk_db::models::mix::MixInput;
use chartdesk_db::repositories::MixRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/mixes
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mixes = MixRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: mixes }))
}

/// POST /api/v1/mixes
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MixInput>,
) -> AppResult<impl IntoResponse> {
    let title = normalize_mix_title(&input.title)?;
    let mix = MixRepo::create(&state.pool, &title).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: mix })))
}

/// PUT /api/v1/mixes/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MixInput>,
) -> AppResult<impl IntoResponse> {
    let title = normalize_mix_title(&input.title)?;
    let mix = MixRepo::rename(&state.pool, id, &title)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Mix", id }))?;
    Ok(Json(DataResponse { data: mix }))
}
