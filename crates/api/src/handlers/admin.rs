//! Admin handlers for curating submitted charts.
//!
//! All handlers require the `admin` role via the [`RequireAdmin`] extractor.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chartdesk_core::category::Category;
use chartdesk_core::commands::{ExportCommand, PurgeCommand};
use chartdesk_db::models::list_entry::AdminEntry;
use chartdesk_db::repositories::ListEntryRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::AdminSearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Submitted entries plus their total, for the admin chart view.
#[derive(Debug, Serialize)]
pub struct SubmittedEntries {
    pub entries: Vec<AdminEntry>,
    pub count: usize,
}

/// Result of a purge.
#[derive(Debug, Serialize)]
pub struct PurgeResult {
    pub deleted: u64,
}

/// GET /api/v1/admin/charts/{category}/entries?search=
///
/// Submitted, not yet exported entries across all users.
pub async fn list_submitted(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<AdminSearchParams>,
) -> AppResult<impl IntoResponse> {
    let category: Category = category.parse()?;
    let entries = ListEntryRepo::list_submitted(&state.pool, category, &params.search).await?;
    let count = entries.len();
    Ok(Json(DataResponse {
        data: SubmittedEntries { entries, count },
    }))
}

/// POST /api/v1/admin/charts/{category}/export
pub async fn export(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(input): Json<ExportCommand>,
) -> AppResult<impl IntoResponse> {
    let category: Category = category.parse()?;
    input.validate()?;
    let entries = ListEntryRepo::mark_exported(&state.pool, category, &input.entry_ids).await?;

    tracing::info!(
        admin_id = admin.user_id,
        category = %category,
        count = entries.len(),
        "Admin exported entries",
    );
    Ok(Json(DataResponse { data: entries }))
}

/// DELETE /api/v1/admin/charts/{category}/entries?period=
///
/// `period` is one of `all`, `one_week`, `one_month`, `three_month`,
/// `six_month`.
pub async fn purge(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(cmd): Query<PurgeCommand>,
) -> AppResult<impl IntoResponse> {
    let category: Category = category.parse()?;
    let cutoff = cmd.period.cutoff(chrono::Utc::now())?;
    let deleted = ListEntryRepo::purge(&state.pool, category, cutoff).await?;

    tracing::info!(
        admin_id = admin.user_id,
        category = %category,
        period = ?cmd.period,
        deleted,
        "Admin purged entries",
    );
    Ok(Json(DataResponse {
        data: PurgeResult { deleted },
    }))
}
