use axum::routing::{get, put};
use axum::Router;

use crate::handlers::artists;
use crate::state::AppState;

/// Routes mounted at `/artists`.
///
/// ```text
/// GET  /       -> list
/// POST /       -> create
/// PUT  /{id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(artists::list).post(artists::create))
        .route("/{id}", put(artists::update))
}
