use axum::routing::{get, put};
use axum::Router;

use crate::handlers::mixes;
use crate::state::AppState;

/// Routes mounted at `/mixes`.
///
/// ```text
/// GET  /       -> list
/// POST /       -> create
/// PUT  /{id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mixes::list).post(mixes::create))
        .route("/{id}", put(mixes::update))
}
