//! Display model construction
//!
//! Turns an [`AggregationSummary`] into the two-slot presentation state.
//! The second slot and the portrait conflict annotation share the same
//! space: when the primary group alone overflows the slots, or the
//! secondary group is itself a conflict, the second slot stays empty and
//! the annotation is shown instead.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use nextup_domain::{
    AggregationSummary, DisplayConfig, DisplayModel, EventInstance, EventSlot, LaunchTarget,
};

use super::when::WhenFormatter;
use crate::time::local_span;

/// Builds [`DisplayModel`]s with a given display configuration.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    config: &'a DisplayConfig,
}

impl<'a> ModelBuilder<'a> {
    /// Builder using `config` for labels and clock format.
    pub fn new(config: &'a DisplayConfig) -> Self {
        Self { config }
    }

    /// Build the model for one pass.
    ///
    /// `summary` must have been produced from the same `events` and `now`;
    /// rows it references are looked up by index.
    pub fn build(
        &self,
        events: &[EventInstance],
        summary: &AggregationSummary,
        now: &DateTime<Tz>,
    ) -> DisplayModel {
        let (day_of_week, day_of_month) = header(now);

        let Some(primary) = summary.primary else {
            return DisplayModel::no_events(day_of_week, day_of_month);
        };

        let labels = &self.config.labels;
        let primary_count = summary.primary_count();
        let secondary_count = summary.secondary_count();

        let mut model = DisplayModel {
            day_of_week,
            day_of_month,
            launch: if primary.all_day {
                LaunchTarget::Detail { at: now.with_timezone(&Utc) }
            } else {
                LaunchTarget::Detail { at: primary.start }
            },
            ..DisplayModel::default()
        };
        model.slots[0] = self.slot(events, Some(primary.row), now);

        if primary_count > 1 {
            model.landscape_conflict = Some(labels.more_events(primary_count - 1));
        }

        if primary_count > 2 {
            model.portrait_conflict = Some(labels.more_events(primary_count - 1));
        } else if primary_count == 1 && secondary_count > 1 {
            model.portrait_conflict = Some(labels.more_events(secondary_count));
        } else {
            let second_row = if primary_count == 2 {
                summary.primary_conflict_row()
            } else {
                summary.secondary_row()
            };
            model.slots[1] = self.slot(events, second_row, now);
        }

        model
    }

    fn slot(&self, events: &[EventInstance], row: Option<usize>, now: &DateTime<Tz>) -> EventSlot {
        let Some(event) = row.and_then(|row| events.get(row)) else {
            return EventSlot::default();
        };

        let (start, _) = local_span(event, &now.timezone());
        let formatter = WhenFormatter {
            use_24_hour_clock: self.config.use_24_hour_clock,
            tomorrow_label: &self.config.labels.tomorrow,
        };

        EventSlot {
            when: Some(formatter.format(&start, event.all_day, now)),
            title: Some(
                event.display_title().unwrap_or(self.config.labels.no_title.as_str()).to_string(),
            ),
            location: event.display_location().map(str::to_string),
        }
    }
}

/// Build a model with the default display configuration.
pub fn build_model(
    events: &[EventInstance],
    summary: &AggregationSummary,
    now: &DateTime<Tz>,
) -> DisplayModel {
    let config = DisplayConfig::default();
    ModelBuilder::new(&config).build(events, summary, now)
}

fn header(now: &DateTime<Tz>) -> (String, String) {
    (now.format("%a").to_string().to_uppercase(), now.day().to_string())
}
