//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Free-text search (`?q=`). An absent or empty query matches everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Admin listing filter (`?search=`), matched against the user name.
#[derive(Debug, Default, Deserialize)]
pub struct AdminSearchParams {
    #[serde(default)]
    pub search: String,
}
