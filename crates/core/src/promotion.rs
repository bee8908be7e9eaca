//! Draft/submitted state transitions.
//!
//! Entries move from draft (`status = false`) to submitted (`status = true`)
//! in batches of exactly `capacity`. Importing flips every submitted entry
//! back to draft and places those entries ahead of the remaining drafts.
//!
//! The planners here are pure; the caller reads the current rows inside a
//! transaction, plans, and writes the plan before committing.

use serde::Serialize;

use crate::chart::missing_entries;
use crate::completeness::{missing_fields, EntryFields};
use crate::error::CoreError;
use crate::reorder::{resequence, PositionAssignment};
use crate::types::DbId;

/// A draft entry considered for submission, in draft-list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCandidate {
    pub id: DbId,
    /// Empty when the entry is complete.
    pub missing: Vec<&'static str>,
}

impl SubmitCandidate {
    pub fn from_entry<E: EntryFields + ?Sized>(id: DbId, entry: &E) -> Self {
        Self {
            id,
            missing: missing_fields(entry),
        }
    }
}

/// A submission order index to be written for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderAssignment {
    pub id: DbId,
    pub order_index: i32,
}

/// Writes produced by a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitPlan {
    /// Entries promoted to submitted, in chart order.
    pub submitted: Vec<OrderAssignment>,
    /// New positions for the drafts left behind.
    pub renumbered: Vec<PositionAssignment>,
}

/// Writes produced by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPlan {
    /// How many submitted entries were recalled into the draft list.
    pub recalled: usize,
    /// Positions for the whole merged draft list.
    pub positions: Vec<PositionAssignment>,
}

/// The first unused order index given the scope's current maximum.
pub fn next_order_index(current_max: Option<i32>) -> i32 {
    current_max.map_or(1, |max| max + 1)
}

/// Plan a submission of the first `capacity` drafts.
///
/// Fails without producing any writes if there are fewer than `capacity`
/// drafts or any of the first `capacity` is incomplete.
pub fn plan_submit(
    drafts: &[SubmitCandidate],
    capacity: usize,
    next_order_index: i32,
) -> Result<SubmitPlan, CoreError> {
    if drafts.len() < capacity {
        return Err(CoreError::Validation(format!(
            "Add {} more tracks before submitting (chart holds {capacity})",
            missing_entries(drafts.len(), capacity)
        )));
    }

    let (top, rest) = drafts.split_at(capacity);

    if let Some((index, candidate)) = top
        .iter()
        .enumerate()
        .find(|(_, candidate)| !candidate.missing.is_empty())
    {
        return Err(CoreError::Validation(format!(
            "Entry at position {} is incomplete: missing {}",
            index + 1,
            candidate.missing.join(", ")
        )));
    }

    let submitted = top
        .iter()
        .enumerate()
        .map(|(offset, candidate)| OrderAssignment {
            id: candidate.id,
            order_index: next_order_index + offset as i32,
        })
        .collect();

    let rest_ids: Vec<DbId> = rest.iter().map(|candidate| candidate.id).collect();

    Ok(SubmitPlan {
        submitted,
        renumbered: resequence(&rest_ids),
    })
}

/// Whether an import would recall anything.
pub fn can_import(submitted_count: i64) -> bool {
    submitted_count > 0
}

/// Plan an import.
///
/// `submitted_ids` must be ordered by ascending order index and `draft_ids`
/// by ascending position. The merged list keeps each group's internal order.
pub fn plan_import(submitted_ids: &[DbId], draft_ids: &[DbId]) -> Result<ImportPlan, CoreError> {
    if submitted_ids.is_empty() {
        return Err(CoreError::Validation(
            "No submitted entries to import".to_string(),
        ));
    }

    let merged: Vec<DbId> = submitted_ids
        .iter()
        .chain(draft_ids.iter())
        .copied()
        .collect();

    Ok(ImportPlan {
        recalled: submitted_ids.len(),
        positions: resequence(&merged),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn complete(id: DbId) -> SubmitCandidate {
        SubmitCandidate {
            id,
            missing: Vec::new(),
        }
    }

    fn incomplete(id: DbId) -> SubmitCandidate {
        SubmitCandidate {
            id,
            missing: vec!["artist", "mixes"],
        }
    }

    // --- next_order_index ---

    #[test]
    fn order_index_starts_at_one() {
        assert_eq!(next_order_index(None), 1);
        assert_eq!(next_order_index(Some(4)), 5);
    }

    // --- plan_submit ---

    #[test]
    fn submit_promotes_top_n_and_renumbers_rest() {
        let drafts = [complete(1), complete(2), complete(3)];
        let plan = plan_submit(&drafts, 2, next_order_index(Some(4))).unwrap();

        assert_eq!(
            plan.submitted,
            vec![
                OrderAssignment { id: 1, order_index: 5 },
                OrderAssignment { id: 2, order_index: 6 },
            ]
        );
        assert_eq!(plan.renumbered, vec![PositionAssignment { id: 3, position: 1 }]);
    }

    #[test]
    fn submit_of_exactly_capacity_leaves_no_drafts() {
        let drafts: Vec<_> = (1..=20).map(complete).collect();
        let plan = plan_submit(&drafts, 20, 1).unwrap();

        assert_eq!(plan.submitted.len(), 20);
        assert!(plan.renumbered.is_empty());
        let indices: Vec<i32> = plan.submitted.iter().map(|a| a.order_index).collect();
        assert_eq!(indices, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn submit_rejects_incomplete_entry_in_top_n() {
        let drafts = [complete(1), incomplete(2)];
        let err = plan_submit(&drafts, 2, 1).unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation(msg)
                if msg == "Entry at position 2 is incomplete: missing artist, mixes"
        );
    }

    #[test]
    fn submit_ignores_incomplete_entries_past_capacity() {
        let drafts = [complete(1), complete(2), incomplete(3)];
        let plan = plan_submit(&drafts, 2, 1).unwrap();
        assert_eq!(plan.renumbered, vec![PositionAssignment { id: 3, position: 1 }]);
    }

    #[test]
    fn submit_rejects_short_list() {
        let drafts: Vec<_> = (1..=17).map(complete).collect();
        let err = plan_submit(&drafts, 20, 1).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Add 3 more tracks"));
    }

    // --- plan_import ---

    #[test]
    fn import_places_submitted_ahead_of_drafts() {
        let plan = plan_import(&[10, 11], &[12]).unwrap();
        assert_eq!(plan.recalled, 2);
        assert_eq!(
            plan.positions,
            vec![
                PositionAssignment { id: 10, position: 1 },
                PositionAssignment { id: 11, position: 2 },
                PositionAssignment { id: 12, position: 3 },
            ]
        );
    }

    #[test]
    fn import_without_drafts_only_recalls() {
        let plan = plan_import(&[5, 6, 7], &[]).unwrap();
        let ids: Vec<DbId> = plan.positions.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn import_with_nothing_submitted_is_rejected() {
        let err = plan_import(&[], &[1, 2]).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("No submitted entries"));
    }

    #[test]
    fn can_import_requires_a_submitted_entry() {
        assert!(!can_import(0));
        assert!(can_import(3));
    }
}
