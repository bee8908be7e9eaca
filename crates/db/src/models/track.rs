//! Catalog track model.

use chartdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a catalog search.
#[derive(Debug, Clone, Serialize)]
pub struct TrackSearch {
    pub results: Vec<Track>,
    /// True when one of `results` equals the query (case-insensitive), so
    /// the client should offer that track instead of creating a new one.
    pub has_exact_match: bool,
}
