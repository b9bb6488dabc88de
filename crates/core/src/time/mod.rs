//! Local wall-clock conversion and day boundaries
//!
//! All-day instances are recorded as reference-zone (UTC) date boundaries.
//! Before they can be compared with "now" they have to be reinterpreted as
//! wall-clock instants in the display zone: `2024-03-04T00:00Z` for an
//! all-day event on March 4th means local midnight of March 4th, whatever
//! the local offset is.
//!
//! Timed instances are already absolute and only change representation.

pub mod flip;

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use nextup_domain::{EventInstance, NextupError, Result};

pub use flip::flip_point;

/// Reinterpret an instant recorded in the reference zone as local wall-clock
/// time in `zone`.
pub fn to_local(zone: &Tz, recorded: DateTime<Utc>) -> DateTime<Tz> {
    resolve_local(zone, recorded.naive_utc())
}

/// Local midnight strictly after `reference`.
pub fn start_of_next_local_day(reference: &DateTime<Tz>) -> DateTime<Tz> {
    let zone = reference.timezone();
    match reference.date_naive().succ_opt() {
        Some(next) => resolve_local(&zone, next.and_time(NaiveTime::MIN)),
        None => *reference + Duration::days(1),
    }
}

/// Local midnight two calendar days after `reference`; the exclusive upper
/// bound of "tomorrow".
pub fn start_of_day_after_next(reference: &DateTime<Tz>) -> DateTime<Tz> {
    start_of_next_local_day(&start_of_next_local_day(reference))
}

/// Local start and end of an instance, converting all-day boundaries.
pub fn local_span(event: &EventInstance, zone: &Tz) -> (DateTime<Tz>, DateTime<Tz>) {
    if event.all_day {
        (to_local(zone, event.start), to_local(zone, event.end))
    } else {
        (event.start.with_timezone(zone), event.end.with_timezone(zone))
    }
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `NextupError::Config` for names missing from the tz database.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| NextupError::Config(format!("unknown timezone {name:?}: {e}")))
}

/// Map a local wall-clock reading onto an instant.
///
/// Readings repeated by a backward transition resolve to the earlier
/// instant; readings skipped by a forward transition move one hour later.
fn resolve_local(zone: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| zone.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;
    use chrono_tz::America::{New_York, Sao_Paulo};
    use chrono_tz::Asia::Tokyo;

    use super::*;

    #[test]
    fn test_to_local_keeps_wall_clock_fields() {
        let recorded = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let local = to_local(&New_York, recorded);

        assert_eq!(local.naive_local(), recorded.naive_utc());
        // 00:00 EST is 05:00 UTC
        assert_eq!(local.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 3, 4, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_to_local_east_of_utc() {
        let recorded = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let local = to_local(&Tokyo, recorded);

        assert_eq!(local.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 3, 3, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_next_local_day() {
        let now = New_York.with_ymd_and_hms(2024, 3, 4, 23, 59, 59).unwrap();
        let next = start_of_next_local_day(&now);

        assert_eq!(next, New_York.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_next_local_day_at_midnight_is_strictly_after() {
        let midnight = New_York.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let next = start_of_next_local_day(&midnight);

        assert_eq!(next, New_York.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_next_day_across_spring_forward() {
        // US spring-forward: 2024-03-10 has 23 hours
        let now = New_York.with_ymd_and_hms(2024, 3, 10, 0, 30, 0).unwrap();
        let next = start_of_next_local_day(&now);

        assert_eq!(next.hour(), 0);
        // 23-hour day, half an hour already gone
        assert_eq!(next - now, Duration::minutes(22 * 60 + 30));
    }

    #[test]
    fn test_skipped_midnight_moves_forward() {
        // Brazil (2018) sprang forward at local midnight on 2018-11-04
        let now = Sao_Paulo.with_ymd_and_hms(2018, 11, 3, 12, 0, 0).unwrap();
        let next = start_of_next_local_day(&now);

        assert_eq!(next.naive_local().date().to_string(), "2018-11-04");
        assert_eq!(next.hour(), 1);
    }

    #[test]
    fn test_day_after_next() {
        let now = Tokyo.with_ymd_and_hms(2024, 12, 31, 8, 0, 0).unwrap();
        let bound = start_of_day_after_next(&now);

        assert_eq!(bound, Tokyo.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_local_span_timed_is_same_instant() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap();
        let event = EventInstance::new(1, start, start + Duration::hours(1));
        let (local_start, _) = local_span(&event, &New_York);

        assert_eq!(local_start.with_timezone(&Utc), start);
        assert_eq!(local_start.hour(), 10);
    }

    #[test]
    fn test_parse_zone() {
        assert_eq!(parse_zone("Asia/Tokyo").unwrap(), Tokyo);
        assert!(matches!(parse_zone("Mars/Olympus"), Err(NextupError::Config(_))));
    }
}
