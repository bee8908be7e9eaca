//! Ranked-list reordering.
//!
//! A draft list is an ordered sequence of entry ids. Every reorder produces a
//! full set of position assignments (`1..=N`) covering the whole list, not
//! just the moved entry, so the stored sequence always matches the computed
//! one.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in `NotFound` errors for list entries.
pub const ENTITY_LIST_ENTRY: &str = "ListEntry";

/// A position to be written for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionAssignment {
    pub id: DbId,
    pub position: i32,
}

/// Move the item at `source_index` so that it ends up at `target_index`.
///
/// Items between the two indices shift by one towards the vacated slot.
/// Equal indices leave the list untouched.
pub fn move_item<T>(
    items: &mut Vec<T>,
    source_index: usize,
    target_index: usize,
) -> Result<(), CoreError> {
    let len = items.len();
    if source_index >= len || target_index >= len {
        return Err(CoreError::Validation(format!(
            "Move from index {source_index} to {target_index} is out of range for a list of {len} entries"
        )));
    }
    if source_index == target_index {
        return Ok(());
    }
    let item = items.remove(source_index);
    items.insert(target_index, item);
    Ok(())
}

/// Stamp each id with its 1-based position in `ids`.
pub fn resequence(ids: &[DbId]) -> Vec<PositionAssignment> {
    ids.iter()
        .enumerate()
        .map(|(index, &id)| PositionAssignment {
            id,
            position: index as i32 + 1,
        })
        .collect()
}

/// Positions after dragging one entry of `current_ids` to a new slot.
pub fn plan_move(
    current_ids: &[DbId],
    source_index: usize,
    target_index: usize,
) -> Result<Vec<PositionAssignment>, CoreError> {
    let mut ids = current_ids.to_vec();
    move_item(&mut ids, source_index, target_index)?;
    Ok(resequence(&ids))
}

/// Positions for an explicit new ordering of the draft list.
///
/// `new_order` must be a permutation of `current_ids`: every current entry
/// exactly once and nothing else.
pub fn plan_reorder(
    current_ids: &[DbId],
    new_order: &[DbId],
) -> Result<Vec<PositionAssignment>, CoreError> {
    let current: HashSet<DbId> = current_ids.iter().copied().collect();
    let mut seen = HashSet::with_capacity(new_order.len());

    for &id in new_order {
        if !current.contains(&id) {
            return Err(CoreError::NotFound {
                entity: ENTITY_LIST_ENTRY,
                id,
            });
        }
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!(
                "Entry {id} appears more than once in the new order"
            )));
        }
    }

    if new_order.len() != current.len() {
        return Err(CoreError::Validation(format!(
            "New order must list all {} draft entries, got {}",
            current.len(),
            new_order.len()
        )));
    }

    Ok(resequence(new_order))
}
