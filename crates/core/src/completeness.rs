//! Entry completeness checks.
//!
//! An entry is complete when it has a title, an artist, and at least one mix.
//! Only the first `capacity` entries of a draft list are checked, since those
//! are the ones a submission would publish.

/// Read access to the fields completeness depends on.
pub trait EntryFields {
    fn title(&self) -> Option<&str>;
    fn artist(&self) -> Option<&str>;
    fn mix_count(&self) -> usize;
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Whether a single entry is ready to be submitted.
pub fn is_complete<E: EntryFields + ?Sized>(entry: &E) -> bool {
    present(entry.title()) && present(entry.artist()) && entry.mix_count() >= 1
}

/// Index of the first incomplete entry among the first `capacity` entries.
pub fn first_incomplete<E: EntryFields>(entries: &[E], capacity: usize) -> Option<usize> {
    entries
        .iter()
        .take(capacity)
        .position(|entry| !is_complete(entry))
}

/// Whether every one of the first `capacity` entries is complete.
pub fn all_complete<E: EntryFields>(entries: &[E], capacity: usize) -> bool {
    first_incomplete(entries, capacity).is_none()
}

/// The names of the fields an entry is missing, for error messages.
pub fn missing_fields<E: EntryFields + ?Sized>(entry: &E) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if !present(entry.title()) {
        missing.push("title");
    }
    if !present(entry.artist()) {
        missing.push("artist");
    }
    if entry.mix_count() == 0 {
        missing.push("mixes");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        title: Option<&'static str>,
        artist: Option<&'static str>,
        mixes: usize,
    }

    impl EntryFields for Fixture {
        fn title(&self) -> Option<&str> {
            self.title
        }
        fn artist(&self) -> Option<&str> {
            self.artist
        }
        fn mix_count(&self) -> usize {
            self.mixes
        }
    }

    fn complete() -> Fixture {
        Fixture {
            title: Some("Strings of Life"),
            artist: Some("Rhythim Is Rhythim"),
            mixes: 1,
        }
    }

    #[test]
    fn complete_entry_passes() {
        assert!(is_complete(&complete()));
        assert!(missing_fields(&complete()).is_empty());
    }

    #[test]
    fn missing_artist_fails() {
        let entry = Fixture {
            artist: None,
            ..complete()
        };
        assert!(!is_complete(&entry));
        assert_eq!(missing_fields(&entry), vec!["artist"]);
    }

    #[test]
    fn blank_artist_fails() {
        let entry = Fixture {
            artist: Some("   "),
            ..complete()
        };
        assert!(!is_complete(&entry));
    }

    #[test]
    fn missing_title_and_mixes_are_both_reported() {
        let entry = Fixture {
            title: None,
            mixes: 0,
            ..complete()
        };
        assert_eq!(missing_fields(&entry), vec!["title", "mixes"]);
    }

    #[test]
    fn only_first_capacity_entries_are_checked() {
        let entries = vec![
            complete(),
            complete(),
            Fixture {
                artist: None,
                ..complete()
            },
        ];
        assert!(all_complete(&entries, 2));
        assert_eq!(first_incomplete(&entries, 3), Some(2));
    }

    #[test]
    fn empty_list_is_trivially_complete() {
        let entries: Vec<Fixture> = Vec::new();
        assert!(all_complete(&entries, 20));
    }
}
