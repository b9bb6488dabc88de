//! Stored event records as kept by a record source
//!
//! A record carries the calendar-level fields a source filters on
//! (calendar selection, the user's own attendance) in addition to the
//! instance fields the aggregation pipeline consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::{EventId, EventInstance};

/// The user's own response to an event invitation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeStatus {
    #[default]
    None,
    Accepted,
    Tentative,
    Invited,
    Declined,
}

crate::impl_status_conversions!(AttendeeStatus {
    None => "none",
    Accepted => "accepted",
    Tentative => "tentative",
    Invited => "invited",
    Declined => "declined",
});

/// Event record as stored by a record source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    /// Owning calendar; the last sort key
    pub calendar_id: i64,
    /// Whether the owning calendar is selected for display
    #[serde(default = "default_selected")]
    pub calendar_selected: bool,
    /// The user's own response
    #[serde(default)]
    pub self_status: AttendeeStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

const fn default_selected() -> bool {
    true
}

impl EventRecord {
    /// Whether a source should offer this record to the display at all.
    pub fn is_displayable(&self) -> bool {
        self.calendar_selected && self.self_status != AttendeeStatus::Declined
    }

    /// Project the record onto the instance shape consumed by aggregation.
    pub fn to_instance(&self) -> EventInstance {
        EventInstance {
            id: self.id,
            start: self.start,
            end: self.end,
            all_day: self.all_day,
            title: self.title.clone(),
            location: self.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;

    fn record(status: AttendeeStatus, selected: bool) -> EventRecord {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
        EventRecord {
            id: EventId(3),
            calendar_id: 1,
            calendar_selected: selected,
            self_status: status,
            start,
            end: start + chrono::Duration::hours(1),
            all_day: false,
            title: Some("Design review".into()),
            location: None,
        }
    }

    #[test]
    fn test_declined_is_not_displayable() {
        assert!(!record(AttendeeStatus::Declined, true).is_displayable());
        assert!(record(AttendeeStatus::Tentative, true).is_displayable());
    }

    #[test]
    fn test_unselected_calendar_is_not_displayable() {
        assert!(!record(AttendeeStatus::Accepted, false).is_displayable());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(AttendeeStatus::from_str("Declined").unwrap(), AttendeeStatus::Declined);
        assert!(AttendeeStatus::from_str("maybe").is_err());
    }

    #[test]
    fn test_record_json_defaults() {
        let rec: EventRecord = serde_json::from_str(
            r#"{"id":1,"calendar_id":2,"start":"2024-05-01T14:00:00Z","end":"2024-05-01T15:00:00Z"}"#,
        )
        .unwrap();

        assert!(rec.calendar_selected);
        assert_eq!(rec.self_status, AttendeeStatus::None);
        assert_eq!(rec.to_instance().id, EventId(1));
    }
}
