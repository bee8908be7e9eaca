//! Typed commands for chart operations.
//!
//! Each command carries only the fields its operation needs. Request bodies
//! deserialize into these types and are validated before any repository call.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::catalog::normalize_title;
use crate::category::Category;
use crate::error::CoreError;
use crate::purge::PurgePeriod;
use crate::types::DbId;

/// The owner and category an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartScope {
    pub user_id: DbId,
    pub category: Category,
}

/// Distinguish an explicit `null` from an absent field.
///
/// Used with `#[serde(default)]` on `Option<Option<T>>` fields: absent gives
/// `None`, `null` gives `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[allow(clippy::ptr_arg)]
fn validate_unique_ids(ids: &Vec<DbId>) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("unique");
        err.message = Some("must not contain duplicates".into());
        Err(err)
    }
}

/// Add a new track by title (search-or-create in the catalog).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTrackCommand {
    #[validate(length(min = 1, max = 300, message = "must be between 1 and 300 characters"))]
    pub title: String,
}

/// Add an entry for a track that already exists in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct AddExistingTrackCommand {
    pub track_id: DbId,
}

/// Replace the draft ordering with an explicit list of entry ids.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderCommand {
    #[validate(custom(function = "validate_unique_ids"))]
    pub entry_ids: Vec<DbId>,
}

/// Drag one entry from `source_index` to `target_index` (0-based).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveCommand {
    pub source_index: usize,
    pub target_index: usize,
}

/// Promote the first `capacity` drafts of a scope.
#[derive(Debug, Clone, Copy)]
pub struct SubmitCommand {
    pub scope: ChartScope,
    pub capacity: usize,
}

/// Recall submitted entries of a scope into its draft list.
#[derive(Debug, Clone, Copy)]
pub struct ImportCommand {
    pub scope: ChartScope,
}

/// Partial update of an entry's descriptive fields.
///
/// Absent fields are left unchanged. `artist_id: null` and `mix_ids: []`
/// are rejected because they would make the entry incomplete.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEntryCommand {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub artist_id: Option<Option<DbId>>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub label: Option<String>,
    pub mix_ids: Option<Vec<DbId>>,
}

/// An [`UpdateEntryCommand`] after validation and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub title: Option<String>,
    pub artist_id: Option<DbId>,
    /// `Some(None)` clears the label.
    pub label: Option<Option<String>>,
    /// Deduplicated, in the order given.
    pub mix_ids: Option<Vec<DbId>>,
}

impl UpdateEntryCommand {
    /// Validate required fields and normalize values for storage.
    pub fn into_update(self) -> Result<EntryUpdate, CoreError> {
        self.validate()?;

        if self.title.is_none()
            && self.artist_id.is_none()
            && self.label.is_none()
            && self.mix_ids.is_none()
        {
            return Err(CoreError::Validation("No fields to update".to_string()));
        }

        let title = self.title.as_deref().map(normalize_title).transpose()?;

        let artist_id = match self.artist_id {
            None => None,
            Some(None) => return Err(CoreError::RequiredField { field: "artist" }),
            Some(Some(id)) => Some(id),
        };

        let label = self.label.map(|label| {
            let trimmed = label.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });

        let mix_ids = match self.mix_ids {
            None => None,
            Some(ids) if ids.is_empty() => {
                return Err(CoreError::RequiredField { field: "mixes" })
            }
            Some(ids) => {
                let mut seen = HashSet::with_capacity(ids.len());
                Some(ids.into_iter().filter(|id| seen.insert(*id)).collect())
            }
        };

        Ok(EntryUpdate {
            title,
            artist_id,
            label,
            mix_ids,
        })
    }
}

/// Mark submitted entries as exported.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExportCommand {
    #[validate(length(min = 1, max = 1000, message = "must list between 1 and 1000 entries"))]
    pub entry_ids: Vec<DbId>,
}

/// Delete entries of a category created within an age window.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PurgeCommand {
    pub period: PurgePeriod,
}
