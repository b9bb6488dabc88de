//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    COUNT_PLACEHOLDER, FALLBACK_REFRESH_SECS, MAX_INSTANCES, MORE_EVENTS_LABEL, NO_TITLE_LABEL,
    ONE_MORE_EVENT_LABEL, REFERENCE_TIMEZONE, SEARCH_WINDOW_DAYS, TOMORROW_LABEL,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timezone, query window and polling
    pub schedule: ScheduleConfig,
    /// Clock format and labels
    pub display: DisplayConfig,
}

/// Refresh scheduling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA name of the local display timezone
    pub timezone: String,
    /// Days ahead of now the record source is queried for
    pub lookahead_days: u32,
    /// Maximum instances fetched per pass
    pub max_instances: usize,
    /// Wake-up interval used when a pass yields no usable deadline
    pub fallback_refresh_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: REFERENCE_TIMEZONE.to_string(),
            lookahead_days: SEARCH_WINDOW_DAYS,
            max_instances: MAX_INSTANCES,
            fallback_refresh_secs: FALLBACK_REFRESH_SECS,
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render times as `15:30` rather than `3:30 PM`
    pub use_24_hour_clock: bool,
    /// Display strings
    pub labels: Labels,
}

/// User-visible strings placed into the display model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Title shown for untitled events
    pub no_title: String,
    /// Marker for events starting tomorrow
    pub tomorrow: String,
    /// Singular conflict text
    pub one_more_event: String,
    /// Plural form; `{count}` is replaced with the number of events
    pub more_events: String,
}

impl Labels {
    /// Pluralised "N more events" text.
    pub fn more_events(&self, count: usize) -> String {
        if count == 1 {
            self.one_more_event.clone()
        } else {
            self.more_events.replace(COUNT_PLACEHOLDER, &count.to_string())
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            no_title: NO_TITLE_LABEL.to_string(),
            tomorrow: TOMORROW_LABEL.to_string(),
            one_more_event: ONE_MORE_EVENT_LABEL.to_string(),
            more_events: MORE_EVENTS_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_pluralize() {
        let labels = Labels::default();
        assert_eq!(labels.more_events(1), "1 more event");
        assert_eq!(labels.more_events(2), "2 more events");
        assert_eq!(labels.more_events(9), "9 more events");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[schedule]
timezone = "Europe/Berlin"

[display.labels]
tomorrow = "Morgen"
"#,
        )
        .unwrap();

        assert_eq!(config.schedule.timezone, "Europe/Berlin");
        assert_eq!(config.schedule.lookahead_days, 7);
        assert_eq!(config.schedule.max_instances, 10);
        assert_eq!(config.schedule.fallback_refresh_secs, 21_600);
        assert!(!config.display.use_24_hour_clock);
        assert_eq!(config.display.labels.tomorrow, "Morgen");
        assert_eq!(config.display.labels.no_title, "(No title)");
    }
}
