//! Next refresh deadline

use chrono::DateTime;
use chrono_tz::Tz;
use nextup_domain::{AggregationSummary, EventInstance};

use crate::time::{flip_point, local_span, start_of_next_local_day};

/// Instant at which the displayed selection stops being correct.
///
/// That is the earlier of the primary event's flip point and the next local
/// midnight (the header date changes then). `None` when nothing is shown.
pub fn next_deadline(
    events: &[EventInstance],
    summary: &AggregationSummary,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let row = summary.primary_row()?;
    let event = events.get(row)?;

    let (start, end) = local_span(event, &now.timezone());
    let flip = flip_point(&start, &end);
    let midnight = start_of_next_local_day(now);

    Some(flip.min(midnight))
}
