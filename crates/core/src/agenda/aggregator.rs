//! Single-pass grouping of upcoming instances by start time
//!
//! The scan keeps at most two start-time groups. Rows whose flip point has
//! already passed are skipped; the first row that would open a third group
//! ends the scan, since the input is ordered by start and nothing after it
//! can join either group.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use nextup_domain::{AggregationSummary, EventInstance, StartGroup, WatchSet};
use tracing::trace;

use crate::time::{flip_point, local_span};

/// Summarise `events` relative to `now`.
///
/// `events` must be ordered by local start (then end, then source id); the
/// grouping relies on equal starts being adjacent. An empty sequence, or
/// one where every row is stale, yields the default summary.
pub fn aggregate(
    events: &[EventInstance],
    watch_set: &WatchSet,
    now: &DateTime<Tz>,
) -> AggregationSummary {
    let zone = now.timezone();
    let mut summary = AggregationSummary::default();

    for (row, event) in events.iter().enumerate() {
        summary.scanned = row + 1;

        let (start, end) = local_span(event, &zone);
        let flip = flip_point(&start, &end);
        if flip < *now {
            trace!(row, id = %event.id, %flip, "skipping stale instance");
            continue;
        }

        if watch_set.contains(&event.id) {
            summary.watch_found = true;
        }

        let start = start.with_timezone(&Utc);
        match (summary.primary.as_mut(), summary.secondary.as_mut()) {
            (None, _) => {
                trace!(row, id = %event.id, %start, "primary group");
                summary.primary = Some(StartGroup::new(row, start, event.all_day));
            }
            (Some(primary), _) if primary.start == start => {
                trace!(row, id = %event.id, "joins primary group");
                primary.absorb(row);
            }
            (Some(_), None) => {
                trace!(row, id = %event.id, %start, "secondary group");
                summary.secondary = Some(StartGroup::new(row, start, event.all_day));
            }
            (Some(_), Some(secondary)) if secondary.start == start => {
                trace!(row, id = %event.id, "joins secondary group");
                secondary.absorb(row);
            }
            (Some(_), Some(_)) => {
                trace!(row, id = %event.id, "third start time, stopping scan");
                break;
            }
        }
    }

    summary
}
