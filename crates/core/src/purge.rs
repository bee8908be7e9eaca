//! Age windows for purging chart entries.

use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurgePeriod {
    All,
    OneWeek,
    OneMonth,
    ThreeMonth,
    SixMonth,
}

impl PurgePeriod {
    /// Earliest `created_at` included in the purge, or `None` for everything.
    ///
    /// Only [`PurgePeriod::All`] yields `None`; a window that cannot be
    /// computed from `now` is an error rather than an unbounded purge.
    pub fn cutoff(self, now: Timestamp) -> Result<Option<Timestamp>, CoreError> {
        let cutoff = match self {
            PurgePeriod::All => return Ok(None),
            PurgePeriod::OneWeek => now.checked_sub_signed(Duration::weeks(1)),
            PurgePeriod::OneMonth => now.checked_sub_months(Months::new(1)),
            PurgePeriod::ThreeMonth => now.checked_sub_months(Months::new(3)),
            PurgePeriod::SixMonth => now.checked_sub_months(Months::new(6)),
        };
        cutoff.map(Some).ok_or_else(|| {
            CoreError::Validation(format!("Cannot compute a {self:?} purge window from {now}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn all_has_no_cutoff() {
        assert_eq!(PurgePeriod::All.cutoff(now()).unwrap(), None);
    }

    #[test]
    fn one_week_is_seven_days() {
        let cutoff = PurgePeriod::OneWeek.cutoff(now()).unwrap().unwrap();
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap());
    }

    #[test]
    fn month_windows_clamp_to_month_end() {
        let cutoff = PurgePeriod::SixMonth.cutoff(now()).unwrap().unwrap();
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap());
        let cutoff = PurgePeriod::ThreeMonth.cutoff(now()).unwrap().unwrap();
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2026, 5, 31, 12, 0, 0).unwrap());
    }

    #[test]
    fn window_before_representable_time_is_rejected() {
        let err = PurgePeriod::SixMonth.cutoff(DateTime::<Utc>::MIN_UTC).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("SixMonth"));
        assert_matches!(
            PurgePeriod::OneWeek.cutoff(DateTime::<Utc>::MIN_UTC),
            Err(CoreError::Validation(_))
        );
        assert_eq!(PurgePeriod::All.cutoff(DateTime::<Utc>::MIN_UTC).unwrap(), None);
    }

    #[test]
    fn deserializes_snake_case_names() {
        let period: PurgePeriod = serde_json::from_str("\"three_month\"").unwrap();
        assert_eq!(period, PurgePeriod::ThreeMonth);
    }
}
