//! Canonical provider-agnostic milestone types.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Milestones keyed by title.
///
/// Title is the identity for reconciliation purposes: two milestones with the
/// same title are "the same" regardless of provider-assigned ids. A `BTreeMap`
/// keeps iteration sorted by title, so listings are deterministic without a
/// separate sort step. Building a map from multiple pages uses last-write-wins
/// per title.
pub type MilestoneMap = BTreeMap<String, Milestone>;

/// A named, due-dated planning marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// Unique key within a project's milestone set.
    pub title: String,
    /// Due date, already rendered in the targeted provider's wire format.
    pub due_date: String,
    /// Provider-assigned identifier; present only on fetched milestones.
    pub id: Option<u64>,
    /// GitHub's per-repository milestone number, used by its reactivation
    /// endpoint instead of `id`.
    pub number: Option<u64>,
    /// Remote lifecycle state; absent on locally generated milestones.
    pub state: Option<MilestoneState>,
}

impl Milestone {
    /// A locally generated (desired) milestone with no remote identity yet.
    pub fn desired(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: due_date.into(),
            id: None,
            number: None,
            state: None,
        }
    }
}

/// Remote milestone lifecycle state.
///
/// GitLab calls the open state "active" and GitHub calls it "open"; both map
/// onto [`MilestoneState::Active`] here and back out at the wire in each
/// provider's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneState {
    Active,
    Closed,
}

/// Due-date wire format. A property of the targeted provider, not of the
/// milestone itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateFormat {
    /// Plain `YYYY-MM-DD` (GitLab dialect).
    Date,
    /// RFC 3339 timestamp at UTC midnight (GitHub dialect).
    Rfc3339,
}

impl DueDateFormat {
    /// Render a calendar date in this wire format.
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            Self::Date => date.format("%Y-%m-%d").to_string(),
            Self::Rfc3339 => Utc
                .from_utc_datetime(&date.and_time(NaiveTime::MIN))
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_milestone_has_no_remote_identity() {
        let m = Milestone::desired("2026-01", "2026-01-31");
        assert_eq!(m.title, "2026-01");
        assert_eq!(m.due_date, "2026-01-31");
        assert!(m.id.is_none());
        assert!(m.number.is_none());
        assert!(m.state.is_none());
    }

    #[test]
    fn test_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(DueDateFormat::Date.format(date), "2026-03-09");
    }

    #[test]
    fn test_rfc3339_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(DueDateFormat::Rfc3339.format(date), "2026-03-09T00:00:00Z");
    }

    #[test]
    fn test_milestone_map_is_sorted_by_title() {
        let mut map = MilestoneMap::new();
        map.insert("b".to_string(), Milestone::desired("b", "2026-01-02"));
        map.insert("a".to_string(), Milestone::desired("a", "2026-01-01"));
        let titles: Vec<_> = map.keys().cloned().collect();
        assert_eq!(titles, vec!["a", "b"]);
    }
}
