//! In-memory record source
//!
//! Holds [`EventRecord`]s and answers the upcoming-instances query the way
//! a calendar store would: only selected calendars, never declined events,
//! ordered by local start day, start minute, end minute and calendar, and
//! capped at the requested limit.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use nextup_core::time::local_span;
use nextup_core::EventSource;
use nextup_domain::{EventId, EventInstance, EventRecord, NextupError, Result};
use parking_lot::RwLock;
use tracing::{debug, instrument};

type SortKey = (NaiveDate, u32, u32, i64);

/// Thread-safe record store implementing [`EventSource`]
#[derive(Debug)]
pub struct InMemoryEventSource {
    zone: Tz,
    records: RwLock<Vec<EventRecord>>,
}

impl InMemoryEventSource {
    /// Create an empty source that orders instances in `zone`.
    pub fn new(zone: Tz) -> Self {
        Self { zone, records: RwLock::new(Vec::new()) }
    }

    /// Create a source holding `records`.
    pub fn with_records(zone: Tz, records: impl IntoIterator<Item = EventRecord>) -> Self {
        let source = Self::new(zone);
        source.replace_all(records);
        source
    }

    /// Load records from a JSON array file.
    ///
    /// # Errors
    /// Returns `NextupError::Source` if the file cannot be read or is not a
    /// JSON array of records.
    pub fn from_json_file(zone: Tz, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            NextupError::Source(format!("Failed to read {}: {e}", path.display()))
        })?;
        let records: Vec<EventRecord> = serde_json::from_str(&contents)
            .map_err(|e| NextupError::Source(format!("Invalid event file: {e}")))?;
        Ok(Self::with_records(zone, records))
    }

    /// Insert a record, replacing any record with the same id.
    pub fn upsert(&self, record: EventRecord) {
        let mut records = self.records.write();
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Remove a record; returns whether it existed.
    pub fn remove(&self, id: EventId) -> bool {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|record| record.id != id);
        records.len() != before
    }

    /// Swap the whole record set.
    pub fn replace_all(&self, records: impl IntoIterator<Item = EventRecord>) {
        *self.records.write() = records.into_iter().collect();
    }

    /// Number of stored records, displayable or not.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn sort_key(&self, record: &EventRecord) -> SortKey {
        let (start, end) = local_span(&record.to_instance(), &self.zone);
        (
            start.date_naive(),
            start.num_seconds_from_midnight() / 60,
            end.num_seconds_from_midnight() / 60,
            record.calendar_id,
        )
    }
}

#[async_trait]
impl EventSource for InMemoryEventSource {
    #[instrument(skip(self), fields(zone = %self.zone))]
    async fn upcoming_instances(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EventInstance>> {
        if window_end <= window_start {
            return Err(NextupError::InvalidInput(format!(
                "empty window: {window_start} .. {window_end}"
            )));
        }

        let records = self.records.read();
        let mut matching: Vec<(SortKey, EventInstance)> = records
            .iter()
            .filter(|record| record.is_displayable())
            .filter_map(|record| {
                let instance = record.to_instance();
                let (start, end) = local_span(&instance, &self.zone);
                let overlaps = start < window_end && end > window_start;
                overlaps.then(|| (self.sort_key(record), instance))
            })
            .collect();
        drop(records);

        matching.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
        matching.truncate(limit);

        debug!(count = matching.len(), "upcoming instances selected");
        Ok(matching.into_iter().map(|(_, instance)| instance).collect())
    }
}
