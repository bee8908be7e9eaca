//! Chart capacity.

use crate::error::CoreError;

/// Number of entries a submitted chart holds ("Top 20").
pub const DEFAULT_CHART_CAPACITY: usize = 20;

/// Upper bound accepted for a configured capacity.
pub const MAX_CHART_CAPACITY: usize = 200;

/// Validate a configured chart capacity.
pub fn validate_capacity(capacity: usize) -> Result<(), CoreError> {
    if capacity == 0 || capacity > MAX_CHART_CAPACITY {
        return Err(CoreError::Validation(format!(
            "Chart capacity must be between 1 and {MAX_CHART_CAPACITY}, got {capacity}"
        )));
    }
    Ok(())
}

/// How many more drafts are needed before a chart can be submitted.
pub fn missing_entries(draft_count: usize, capacity: usize) -> usize {
    capacity.saturating_sub(draft_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_valid() {
        assert!(validate_capacity(DEFAULT_CHART_CAPACITY).is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = validate_capacity(0).unwrap_err();
        assert!(err.to_string().contains("between 1 and"));
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        assert!(validate_capacity(MAX_CHART_CAPACITY + 1).is_err());
    }

    #[test]
    fn missing_entries_saturates() {
        assert_eq!(missing_entries(17, 20), 3);
        assert_eq!(missing_entries(20, 20), 0);
        assert_eq!(missing_entries(25, 20), 0);
    }
}
