//! Flip point: the instant an event stops counting as "current"

use chrono::{DateTime, Duration, TimeZone};
use nextup_domain::constants::FLIP_CAP_MINUTES;

/// `start + min(15 minutes, duration / 2)`.
///
/// Short events flip at their midpoint, longer ones fifteen minutes after
/// they begin. Both instants must share a reference frame; all-day
/// boundaries have to be converted with [`super::to_local`] first.
pub fn flip_point<Z: TimeZone>(start: &DateTime<Z>, end: &DateTime<Z>) -> DateTime<Z> {
    let half = end.clone().signed_duration_since(start.clone()) / 2;
    let offset = half.min(Duration::minutes(FLIP_CAP_MINUTES));
    start.clone() + offset
}
