//! Handlers for single list entries (`/entries/{id}`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chartdesk_core::commands::UpdateEntryCommand;
use chartdesk_core::types::DbId;
use chartdesk_db::repositories::ListEntryRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/entries/{id}
///
/// Partial update of title, artist, label and mixes. Only the owner may
/// edit, and only while the entry is a draft.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEntryCommand>,
) -> AppResult<impl IntoResponse> {
    let update = input.into_update()?;
    let entry = ListEntryRepo::update_fields(&state.pool, user.user_id, id, &update).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/entries/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ListEntryRepo::delete_draft(&state.pool, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
