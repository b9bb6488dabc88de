//! Shared fixtures for `nextup-infra` integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use nextup_core::{EventSource, MockClock, RenderSink};
use nextup_domain::{
    AttendeeStatus, Config, DisplayModel, EventId, EventInstance, EventRecord, NextupError,
    Result, SurfaceTargets,
};
use nextup_infra::refresh::{RefreshCoordinator, RefreshPorts, TokioDeadlineTimer};
use nextup_infra::source::InMemoryEventSource;
use parking_lot::Mutex;

pub const ZONE: Tz = chrono_tz::Europe::Madrid;

/// Thursday 2024-03-14, 10:00 in Madrid
pub fn start() -> DateTime<Utc> {
    ZONE.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap().with_timezone(&Utc)
}

pub fn config() -> Config {
    let mut config = Config::default();
    config.schedule.timezone = ZONE.name().to_string();
    config
}

/// Timed record starting `start_min` minutes after [`start`].
pub fn record(id: i64, start_min: i64, len_min: i64) -> EventRecord {
    let begin = start() + Duration::minutes(start_min);
    EventRecord {
        id: EventId(id),
        calendar_id: 1,
        calendar_selected: true,
        self_status: AttendeeStatus::Accepted,
        start: begin,
        end: begin + Duration::minutes(len_min),
        all_day: false,
        title: Some(format!("Event {id}")),
        location: None,
    }
}

/// Render sink that remembers every push.
#[derive(Default)]
pub struct RecordingSink {
    renders: Mutex<Vec<(SurfaceTargets, DisplayModel)>>,
    fail: Mutex<bool>,
}

impl RecordingSink {
    pub fn renders(&self) -> Vec<(SurfaceTargets, DisplayModel)> {
        self.renders.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    pub fn last_model(&self) -> Option<DisplayModel> {
        self.renders.lock().last().map(|(_, model)| model.clone())
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl RenderSink for RecordingSink {
    async fn render(&self, targets: &SurfaceTargets, model: &DisplayModel) -> Result<()> {
        if *self.fail.lock() {
            return Err(NextupError::Render("surface gone".to_string()));
        }
        self.renders.lock().push((targets.clone(), model.clone()));
        Ok(())
    }
}

/// Source that always fails and counts the attempts.
#[derive(Default)]
pub struct FailingSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl EventSource for FailingSource {
    async fn upcoming_instances(
        &self,
        _window_start: DateTime<Utc>,
        _window_end: DateTime<Utc>,
        _limit: usize,
    ) -> Result<Vec<EventInstance>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(NextupError::Source("store unavailable".to_string()))
    }
}

/// A coordinator wired to an in-memory source, a recording sink and a
/// Tokio timer, all sharing one mock clock.
pub struct Harness {
    pub clock: MockClock,
    pub source: Arc<InMemoryEventSource>,
    pub sink: Arc<RecordingSink>,
    pub timer: Arc<TokioDeadlineTimer>,
    pub coordinator: RefreshCoordinator,
}

impl Harness {
    pub fn new(records: Vec<EventRecord>) -> Self {
        let clock = MockClock::new(start());
        let source = Arc::new(InMemoryEventSource::with_records(ZONE, records));
        let sink = Arc::new(RecordingSink::default());
        let timer = Arc::new(TokioDeadlineTimer::new(Arc::new(clock.clone())).unwrap());

        let ports = RefreshPorts {
            source: source.clone(),
            sink: sink.clone(),
            timer: timer.clone(),
            clock: Arc::new(clock.clone()),
        };
        let coordinator = RefreshCoordinator::new(&config(), ports).unwrap();

        Self { clock, source, sink, timer, coordinator }
    }
}
