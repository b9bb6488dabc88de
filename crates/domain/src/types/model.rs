//! Presentation-ready display model
//!
//! Built fresh on every pass and never mutated afterwards. Structural
//! equality is derived so callers can tell whether a pass changed anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SLOT_COUNT;

/// One event line on the display; every field is hidden when `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventSlot {
    /// Start text; the slot is visible iff this is set
    pub when: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "where")]
    pub location: Option<String>,
}

impl EventSlot {
    /// Whether the slot shows an event.
    pub fn is_visible(&self) -> bool {
        self.when.is_some()
    }
}

/// Where activating the surface should take the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchTarget {
    /// The agenda overview
    #[default]
    Agenda,
    /// Detail view positioned at the given instant
    Detail { at: DateTime<Utc> },
}

/// Complete two-slot display state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayModel {
    /// Upper-case abbreviated weekday, e.g. `MON`
    pub day_of_week: String,
    pub day_of_month: String,
    /// Nothing upcoming; slots and conflicts are hidden
    pub no_events: bool,
    pub slots: [EventSlot; SLOT_COUNT],
    /// Shown in place of the second slot in portrait layouts
    pub portrait_conflict: Option<String>,
    /// Shown beside the primary slot in landscape layouts
    pub landscape_conflict: Option<String>,
    pub launch: LaunchTarget,
}

impl DisplayModel {
    /// The "nothing upcoming" state: header only.
    pub fn no_events(day_of_week: impl Into<String>, day_of_month: impl Into<String>) -> Self {
        Self {
            day_of_week: day_of_week.into(),
            day_of_month: day_of_month.into(),
            no_events: true,
            ..Self::default()
        }
    }

    /// Number of slots showing an event.
    pub fn visible_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_visible()).count()
    }
}
