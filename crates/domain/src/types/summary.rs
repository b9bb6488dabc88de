//! Aggregation summary produced by a single scan over upcoming instances

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cluster of instances sharing one start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGroup {
    /// Row of the representative (first) instance
    pub row: usize,
    /// Local start instant shared by every member
    pub start: DateTime<Utc>,
    /// Whether the representative is an all-day instance
    pub all_day: bool,
    /// Number of members, representative included
    pub count: usize,
    /// First member after the representative
    pub conflict_row: Option<usize>,
}

impl StartGroup {
    /// Open a group with `row` as its only member.
    pub fn new(row: usize, start: DateTime<Utc>, all_day: bool) -> Self {
        Self { row, start, all_day, count: 1, conflict_row: None }
    }

    /// Add another member to the group.
    pub fn absorb(&mut self, row: usize) {
        self.count += 1;
        if self.conflict_row.is_none() {
            self.conflict_row = Some(row);
        }
    }
}

/// Up to two distinct start-time groups plus the watch flag.
///
/// `Default` is the "nothing upcoming" sentinel state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSummary {
    /// Earliest surviving start time
    pub primary: Option<StartGroup>,
    /// Next distinct start time after the primary
    pub secondary: Option<StartGroup>,
    /// A watched identifier survived the staleness filter
    pub watch_found: bool,
    /// Rows examined before the scan ended
    pub scanned: usize,
}

impl AggregationSummary {
    /// Primary group size; 0 when nothing is upcoming.
    pub fn primary_count(&self) -> usize {
        self.primary.map_or(0, |g| g.count)
    }

    /// Secondary group size; 0 when there is no secondary group.
    pub fn secondary_count(&self) -> usize {
        self.secondary.map_or(0, |g| g.count)
    }

    /// Row of the primary representative.
    pub fn primary_row(&self) -> Option<usize> {
        self.primary.map(|g| g.row)
    }

    /// Row of the first instance sharing the primary start.
    pub fn primary_conflict_row(&self) -> Option<usize> {
        self.primary.and_then(|g| g.conflict_row)
    }

    /// Row of the secondary representative.
    pub fn secondary_row(&self) -> Option<usize> {
        self.secondary.map(|g| g.row)
    }

    /// Whether the primary representative is all-day.
    pub fn primary_all_day(&self) -> bool {
        self.primary.is_some_and(|g| g.all_day)
    }

    /// No instance survived the scan.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_default_is_sentinel() {
        let summary = AggregationSummary::default();
        assert!(summary.is_empty());
        assert_eq!(summary.primary_count(), 0);
        assert_eq!(summary.secondary_count(), 0);
        assert_eq!(summary.primary_row(), None);
        assert_eq!(summary.primary_conflict_row(), None);
        assert!(!summary.watch_found);
    }

    #[test]
    fn test_absorb_records_first_conflict_only() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut group = StartGroup::new(0, start, false);
        group.absorb(1);
        group.absorb(2);

        assert_eq!(group.count, 3);
        assert_eq!(group.conflict_row, Some(1));
    }
}
