pub mod admin;
pub mod artists;
pub mod charts;
pub mod entries;
pub mod health;
pub mod mixes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route requires a Bearer token; `/admin` routes require the `admin`
/// role. `{category}` is `commercial` or `upfront`.
///
/// ```text
/// /charts/{category}/entries                       draft list, add track
/// /charts/{category}/entries/existing              add existing track (POST)
/// /charts/{category}/entries/order                 reorder (PUT)
/// /charts/{category}/entries/move                  move one entry (POST)
/// /charts/{category}/tracks                        catalog search (?q=)
/// /charts/{category}/submit                        submit (POST)
/// /charts/{category}/import                        can-import (GET), import (POST)
///
/// /entries/{id}                                    update, delete own draft
///
/// /artists                                         list (?q=), create
/// /artists/{id}                                    rename
/// /mixes                                           list, create
/// /mixes/{id}                                      rename
///
/// /admin/charts/{category}/entries                 submitted (?search=), purge (?period=)
/// /admin/charts/{category}/export                  mark exported (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/charts", charts::router())
        .nest("/entries", entries::router())
        .nest("/artists", artists::router())
        .nest("/mixes", mixes::router())
        .nest("/admin", admin::router())
}
