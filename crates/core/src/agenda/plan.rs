//! One refresh pass: aggregate, decide whether to render, pick a wake time

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use nextup_domain::constants::FALLBACK_REFRESH_SECS;
use nextup_domain::{
    AggregationSummary, Config, DisplayConfig, DisplayModel, EventInstance, WatchSet,
};
use tracing::{debug, warn};

use super::model_builder::ModelBuilder;
use super::refresh::next_deadline;

/// Per-pass settings derived from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOptions {
    /// Clock format and labels for the model
    pub display: DisplayConfig,
    /// Wake-up delay used when the pass yields no usable deadline
    pub fallback_refresh: Duration,
}

impl PassOptions {
    /// Derive options; a zero or out-of-range fallback uses the default.
    pub fn from_config(config: &Config) -> Self {
        let fallback_refresh = i64::try_from(config.schedule.fallback_refresh_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .filter(|interval| *interval > Duration::zero())
            .unwrap_or_else(default_fallback);
        Self { display: config.display.clone(), fallback_refresh }
    }
}

impl Default for PassOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Outcome of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshPlan {
    /// None of the changed events is on display; leave surfaces and the
    /// pending deadline untouched.
    Skip,
    /// Push `model` and wake up again at `wake_at`.
    Render { model: DisplayModel, wake_at: DateTime<Tz> },
}

impl RefreshPlan {
    /// Model to push, if any.
    pub fn model(&self) -> Option<&DisplayModel> {
        match self {
            Self::Skip => None,
            Self::Render { model, .. } => Some(model),
        }
    }

    /// Next wake-up instant, if any.
    pub fn wake_at(&self) -> Option<&DateTime<Tz>> {
        match self {
            Self::Skip => None,
            Self::Render { wake_at, .. } => Some(wake_at),
        }
    }
}

/// Plan one pass over `events`.
///
/// An empty `watch_set` means a full refresh. A non-empty one names events
/// known to have changed; if none of them survives the staleness filter the
/// pass is skipped, unless nothing at all is upcoming, in which case the
/// no-events state is always rendered.
pub fn plan_pass(
    events: &[EventInstance],
    watch_set: &WatchSet,
    now: &DateTime<Tz>,
    options: &PassOptions,
) -> RefreshPlan {
    let summary = super::aggregate(events, watch_set, now);
    let builder = ModelBuilder::new(&options.display);
    let fallback = now.checked_add_signed(options.fallback_refresh).unwrap_or(*now);

    if summary.is_empty() {
        debug!(scanned = summary.scanned, "no upcoming events");
        return RefreshPlan::Render { model: builder.build(events, &summary, now), wake_at: fallback };
    }

    if !watch_set.is_empty() && !summary.watch_found {
        debug!(watched = watch_set.len(), "changed events not on display, skipping pass");
        return RefreshPlan::Skip;
    }

    let model = builder.build(events, &summary, now);
    let wake_at = usable_deadline(events, &summary, now).unwrap_or(fallback);
    debug!(
        primary = summary.primary_count(),
        secondary = summary.secondary_count(),
        %wake_at,
        "pass planned"
    );

    RefreshPlan::Render { model, wake_at }
}

fn default_fallback() -> Duration {
    Duration::seconds(FALLBACK_REFRESH_SECS as i64)
}

fn usable_deadline(
    events: &[EventInstance],
    summary: &AggregationSummary,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match next_deadline(events, summary, now) {
        Some(deadline) if deadline > *now => Some(deadline),
        Some(deadline) => {
            warn!(%deadline, %now, "deadline not in the future, using fallback interval");
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use chrono_tz::Europe::London;
    use nextup_domain::EventId;

    use super::*;

    fn now() -> DateTime<Tz> {
        London.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    fn event(id: i64, start_min: i64) -> EventInstance {
        let start = now().with_timezone(&Utc) + Duration::minutes(start_min);
        EventInstance::new(id, start, start + Duration::hours(1))
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.schedule.fallback_refresh_secs = 600;
        let options = PassOptions::from_config(&config);

        assert_eq!(options.fallback_refresh, Duration::minutes(10));
        assert_eq!(PassOptions::default().fallback_refresh, Duration::hours(6));

        config.schedule.fallback_refresh_secs = 0;
        assert_eq!(PassOptions::from_config(&config).fallback_refresh, Duration::hours(6));
    }

    #[test]
    fn test_empty_renders_no_events_with_fallback() {
        let plan = plan_pass(&[], &WatchSet::new(), &now(), &PassOptions::default());

        assert!(plan.model().unwrap().no_events);
        assert_eq!(plan.wake_at(), Some(&(now() + Duration::hours(6))));
    }

    #[test]
    fn test_empty_renders_even_with_watch_set() {
        let watch: WatchSet = [EventId(9)].into_iter().collect();
        let plan = plan_pass(&[], &watch, &now(), &PassOptions::default());

        assert!(plan.model().is_some_and(|m| m.no_events));
    }

    #[test]
    fn test_unmatched_watch_set_skips() {
        let watch: WatchSet = [EventId(9)].into_iter().collect();
        let plan = plan_pass(&[event(1, 30)], &watch, &now(), &PassOptions::default());

        assert_eq!(plan, RefreshPlan::Skip);
    }

    #[test]
    fn test_matched_watch_set_renders() {
        let watch: WatchSet = [EventId(1)].into_iter().collect();
        let plan = plan_pass(&[event(1, 30)], &watch, &now(), &PassOptions::default());

        assert_eq!(plan.wake_at(), Some(&(now() + Duration::minutes(45))));
    }

    #[test]
    fn test_fallback_saturates_at_end_of_time() {
        let last = Utc.from_utc_datetime(&NaiveDateTime::MAX).with_timezone(&Tz::UTC);
        let plan = plan_pass(&[], &WatchSet::new(), &last, &PassOptions::default());
        assert_eq!(plan.wake_at(), Some(&last));
    }

    #[test]
    fn test_deadline_at_now_falls_back() {
        // flip lands exactly on now
        let plan = plan_pass(&[event(1, -15)], &WatchSet::new(), &now(), &PassOptions::default());

        assert!(plan.model().is_some_and(|m| !m.no_events));
        assert_eq!(plan.wake_at(), Some(&(now() + Duration::hours(6))));
    }
}
