//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Flip point: an event cedes the "current" slot this long after it starts,
// or halfway through it when that comes sooner.
pub const FLIP_CAP_MINUTES: i64 = 15;

// Record source window and cap
pub const SEARCH_WINDOW_DAYS: u32 = 7;
pub const MAX_INSTANCES: usize = 10;

// Number of event slots on the display surface
pub const SLOT_COUNT: usize = 2;

// Polling interval used when no usable deadline exists
pub const FALLBACK_REFRESH_SECS: u64 = 6 * 60 * 60;

// Reference zone in which all-day boundaries are recorded
pub const REFERENCE_TIMEZONE: &str = "UTC";

// Default display labels
pub const NO_TITLE_LABEL: &str = "(No title)";
pub const TOMORROW_LABEL: &str = "Tomorrow";
pub const ONE_MORE_EVENT_LABEL: &str = "1 more event";
pub const MORE_EVENTS_LABEL: &str = "{count} more events";
pub const COUNT_PLACEHOLDER: &str = "{count}";
