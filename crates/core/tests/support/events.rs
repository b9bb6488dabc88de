//! Event fixtures anchored at a fixed local instant

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use nextup_domain::EventInstance;

pub const ZONE: Tz = chrono_tz::America::New_York;

/// Wednesday 2024-10-16, 14:00 in New York
pub fn now() -> DateTime<Tz> {
    ZONE.with_ymd_and_hms(2024, 10, 16, 14, 0, 0).unwrap()
}

/// Timed instance starting `start_min` minutes after [`now`].
pub fn timed(id: i64, start_min: i64, len_min: i64) -> EventInstance {
    let start = now().with_timezone(&Utc) + Duration::minutes(start_min);
    EventInstance::new(id, start, start + Duration::minutes(len_min))
        .with_title(format!("Event {id}"))
}

/// All-day instance on `date`, recorded as UTC midnight boundaries.
pub fn all_day(id: i64, date: NaiveDate) -> EventInstance {
    let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    EventInstance::new(id, start, start + Duration::days(1))
        .all_day()
        .with_title(format!("All day {id}"))
}

/// Next local midnight after [`now`].
pub fn midnight() -> DateTime<Tz> {
    ZONE.with_ymd_and_hms(2024, 10, 17, 0, 0, 0).unwrap()
}
