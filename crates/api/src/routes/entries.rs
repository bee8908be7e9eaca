//! Route definitions for single list entries.

use axum::routing::put;
use axum::Router;

use crate::handlers::entries;
use crate::state::AppState;

/// Routes mounted at `/entries`.
///
/// ```text
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(entries::update).delete(entries::delete))
}
