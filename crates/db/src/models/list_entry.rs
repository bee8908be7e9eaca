//! List entry models.
//!
//! A list entry places one catalog track in one user's chart. Drafts are
//! ranked by `position`; submitted entries are ordered by `order_index`.

use chartdesk_core::completeness::EntryFields;
use chartdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::mix::MixSummary;

/// A bare row from the `list_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub track_id: DbId,
    pub category: String,
    pub position: Option<i32>,
    pub status: bool,
    pub order_index: Option<i32>,
    pub is_export: bool,
    pub artist_id: Option<DbId>,
    pub label: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A list entry joined with its track title, artist name and mixes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListEntryDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub track_id: DbId,
    pub category: String,
    pub position: Option<i32>,
    pub status: bool,
    pub order_index: Option<i32>,
    pub is_export: bool,
    pub artist_id: Option<DbId>,
    pub label: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub title: String,
    pub artist_name: Option<String>,
    #[sqlx(skip)]
    pub mixes: Vec<MixSummary>,
    /// Filled in after `mixes` is loaded.
    #[sqlx(skip)]
    pub is_complete: bool,
}

impl EntryFields for ListEntryDetail {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn artist(&self) -> Option<&str> {
        self.artist_name.as_deref()
    }

    fn mix_count(&self) -> usize {
        self.mixes.len()
    }
}

/// A submitted entry with its owner, for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: ListEntryDetail,
    pub user_name: String,
    pub user_email: String,
}

/// Draft list as returned to the owner.
#[derive(Debug, Clone, Serialize)]
pub struct DraftList {
    pub entries: Vec<ListEntryDetail>,
    pub capacity: usize,
    /// Whether a submission would currently be accepted.
    pub can_submit: bool,
}

/// Mix link row used when attaching mixes to entries.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct EntryMixRow {
    pub list_entry_id: DbId,
    pub id: DbId,
    pub title: String,
}
