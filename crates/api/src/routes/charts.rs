//! Route definitions for a user's charts.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::charts;
use crate::state::AppState;

/// Routes mounted at `/charts`.
///
/// ```text
/// GET  /{category}/entries           -> list_entries
/// POST /{category}/entries           -> add_track
/// POST /{category}/entries/existing  -> add_existing_track
/// PUT  /{category}/entries/order     -> reorder
/// POST /{category}/entries/move      -> move_entry
/// GET  /{category}/tracks            -> search_tracks
/// POST /{category}/submit            -> submit
/// GET  /{category}/import            -> import_status
/// POST /{category}/import            -> import
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{category}/entries",
            get(charts::list_entries).post(charts::add_track),
        )
        .route(
            "/{category}/entries/existing",
            post(charts::add_existing_track),
        )
        .route("/{category}/entries/order", put(charts::reorder))
        .route("/{category}/entries/move", post(charts::move_entry))
        .route("/{category}/tracks", get(charts::search_tracks))
        .route("/{category}/submit", post(charts::submit))
        .route(
            "/{category}/import",
            get(charts::import_status).post(charts::import),
        )
}
