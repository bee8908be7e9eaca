use chartdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `mixes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mix {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a mix.
#[derive(Debug, Clone, Deserialize)]
pub struct MixInput {
    pub title: String,
}

/// A mix as linked to a list entry.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct MixSummary {
    pub id: DbId,
    pub title: String,
}
