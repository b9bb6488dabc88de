//! Port interfaces for the refresh pipeline
//!
//! These traits define the boundaries between the pure agenda logic and
//! the adapters that fetch events, draw surfaces and deliver wake-ups.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nextup_domain::{DisplayModel, EventInstance, Result, SurfaceTargets};

/// Callback fired when a scheduled deadline is reached
pub type WakeFn = Arc<dyn Fn() + Send + Sync>;

/// Trait for fetching upcoming event instances
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Instances overlapping `[window_start, window_end)`, ordered by local
    /// start, end and calendar, at most `limit` of them
    async fn upcoming_instances(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EventInstance>>;
}

/// Trait for pushing a display model onto surfaces
#[async_trait]
pub trait RenderSink: Send + Sync {
    async fn render(&self, targets: &SurfaceTargets, model: &DisplayModel) -> Result<()>;
}

/// One-shot wake-up timer
///
/// Scheduling replaces any pending wake-up, so at most one is armed.
pub trait DeadlineTimer: Send + Sync {
    /// Cancel the pending wake-up, if any, and arm a new one for `at`
    fn schedule(&self, at: DateTime<Utc>, wake: WakeFn) -> Result<()>;

    /// Cancel the pending wake-up
    fn cancel(&self);

    /// Instant of the pending wake-up
    fn scheduled_at(&self) -> Option<DateTime<Utc>>;
}
