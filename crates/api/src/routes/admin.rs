//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /charts/{category}/entries   -> list_submitted
/// DELETE /charts/{category}/entries   -> purge
/// POST   /charts/{category}/export    -> export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/charts/{category}/entries",
            get(admin::list_submitted).delete(admin::purge),
        )
        .route("/charts/{category}/export", post(admin::export))
}
