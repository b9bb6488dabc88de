//! Request-coalescing refresh coordinator
//!
//! Owns the single worker that runs refresh passes. Callers submit
//! [`UpdateRequest`]s from any thread; requests are merged into one pending
//! snapshot under a mutex, and at most one worker task drains it. Each pass
//! is evaluated at the latest trigger instant of its snapshot: it fetches
//! upcoming instances, plans the display, pushes the model and arms the
//! deadline timer, whose firing submits a full refresh.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use chrono_tz::Tz;
//! use nextup_core::SystemClock;
//! use nextup_domain::{Config, UpdateRequest};
//! use nextup_infra::refresh::{RefreshCoordinator, RefreshPorts, TokioDeadlineTimer};
//! use nextup_infra::render::TracingRenderSink;
//! use nextup_infra::source::InMemoryEventSource;
//!
//! # async fn example() -> nextup_domain::Result<()> {
//! let config = Config::default();
//! let clock = Arc::new(SystemClock);
//! let ports = RefreshPorts {
//!     source: Arc::new(InMemoryEventSource::new(Tz::UTC)),
//!     sink: Arc::new(TracingRenderSink),
//!     timer: Arc::new(TokioDeadlineTimer::new(clock.clone())?),
//!     clock,
//! };
//!
//! let coordinator = RefreshCoordinator::new(&config, ports)?;
//! coordinator.refresh_now()?;
//! // ... application runs ...
//! coordinator.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::pin::pin;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use nextup_core::{
    parse_zone, plan_pass, Clock, DeadlineTimer, EventSource, PassOptions, RefreshPlan,
    RenderSink, WakeFn,
};
use nextup_domain::{Config, DisplayModel, EventInstance, SurfaceTargets, UpdateRequest};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::error::{RefreshError, RefreshResult};
use super::pending::{PendingPass, PendingUpdates};

/// Timeouts applied around collaborator calls.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Timeout for one record source query
    pub source_timeout: Duration,
    /// Timeout for one render sink push
    pub render_timeout: Duration,
    /// Timeout for awaiting the worker on shutdown
    pub shutdown_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_secs(10),
            render_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

/// Collaborators a coordinator drives
pub struct RefreshPorts {
    /// Where upcoming instances come from
    pub source: Arc<dyn EventSource>,
    /// Where models are pushed
    pub sink: Arc<dyn RenderSink>,
    /// One-shot wake-up for the next deadline
    pub timer: Arc<dyn DeadlineTimer>,
    /// Stamps refreshes triggered without an explicit instant
    pub clock: Arc<dyn Clock>,
}

/// Handle to the refresh worker; cheap to clone
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    ports: RefreshPorts,
    zone: Tz,
    options: PassOptions,
    lookahead: chrono::Duration,
    max_instances: usize,
    config: CoordinatorConfig,
    runtime: Handle,
    pending: Mutex<PendingUpdates>,
    last_rendered: Mutex<Option<(SurfaceTargets, DisplayModel)>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    idle: Notify,
    shutdown: CancellationToken,
}

impl RefreshCoordinator {
    /// Create a coordinator with default timeouts.
    ///
    /// # Errors
    /// Returns `NextupError::Config` for an unknown timezone or when called
    /// outside a Tokio runtime.
    pub fn new(config: &Config, ports: RefreshPorts) -> nextup_domain::Result<Self> {
        Self::with_config(config, ports, CoordinatorConfig::default())
    }

    /// Create a coordinator with custom timeouts.
    ///
    /// # Errors
    /// See [`RefreshCoordinator::new`].
    pub fn with_config(
        config: &Config,
        ports: RefreshPorts,
        coordinator_config: CoordinatorConfig,
    ) -> nextup_domain::Result<Self> {
        let zone = parse_zone(&config.schedule.timezone)?;
        let runtime = Handle::try_current().map_err(|_| RefreshError::NoRuntime)?;

        Ok(Self {
            inner: Arc::new(Inner {
                ports,
                zone,
                options: PassOptions::from_config(config),
                lookahead: chrono::Duration::days(i64::from(config.schedule.lookahead_days)),
                max_instances: config.schedule.max_instances,
                config: coordinator_config,
                runtime,
                pending: Mutex::new(PendingUpdates::default()),
                last_rendered: Mutex::new(None),
                worker: Mutex::new(None),
                idle: Notify::new(),
                shutdown: CancellationToken::new(),
            }),
        })
    }

    /// Queue an update; starts the worker if it is not running.
    ///
    /// # Errors
    /// Returns [`RefreshError::NotRunning`] after [`shutdown`](Self::shutdown).
    pub fn request_update(&self, request: UpdateRequest) -> RefreshResult<()> {
        Inner::submit(&self.inner, request)
    }

    /// Queue a full refresh of every surface.
    ///
    /// # Errors
    /// See [`RefreshCoordinator::request_update`].
    pub fn refresh_now(&self) -> RefreshResult<()> {
        self.request_update(UpdateRequest::full(self.inner.ports.clock.now()))
    }

    /// Whether a worker is currently running or about to run.
    pub fn is_busy(&self) -> bool {
        self.inner.pending.lock().is_running()
    }

    /// Wait until the worker has drained every pending request.
    pub async fn wait_idle(&self) {
        loop {
            let mut notified = pin!(self.inner.idle.notified());
            notified.as_mut().enable();
            if !self.is_busy() {
                return;
            }
            notified.await;
        }
    }

    /// Last model pushed to the sink, with the targets it went to.
    pub fn last_rendered(&self) -> Option<(SurfaceTargets, DisplayModel)> {
        self.inner.last_rendered.lock().clone()
    }

    /// Stop accepting requests, cancel the pending deadline and wait for the
    /// worker to finish its current pass.
    ///
    /// # Errors
    /// [`RefreshError::NotRunning`] if already shut down,
    /// [`RefreshError::Timeout`] if the worker does not finish in time,
    /// [`RefreshError::TaskJoinFailed`] if it panicked.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> RefreshResult<()> {
        if self.inner.shutdown.is_cancelled() {
            return Err(RefreshError::NotRunning);
        }

        self.inner.shutdown.cancel();
        self.inner.ports.timer.cancel();

        let handle = self.inner.worker.lock().take();
        if let Some(handle) = handle {
            let join_timeout = self.inner.config.shutdown_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|_| RefreshError::Timeout { seconds: join_timeout.as_secs() })?
                .map_err(|e| RefreshError::TaskJoinFailed(e.to_string()))?;
        }

        // a pass finishing during shutdown may have re-armed the timer
        self.inner.ports.timer.cancel();
        self.inner.pending.lock().stop();
        self.inner.idle.notify_waiters();
        info!("Refresh coordinator stopped");
        Ok(())
    }
}

impl Inner {
    fn submit(inner: &Arc<Self>, request: UpdateRequest) -> RefreshResult<()> {
        if inner.shutdown.is_cancelled() {
            return Err(RefreshError::NotRunning);
        }

        let mut pending = inner.pending.lock();
        pending.merge(request);
        if pending.claim_worker() {
            // stored under the pending lock; a finished worker's handle never
            // replaces a newer one
            let worker = Arc::clone(inner);
            let handle = inner.runtime.spawn(async move { worker.run_worker().await });
            *inner.worker.lock() = Some(handle);
        }
        Ok(())
    }

    async fn run_worker(self: Arc<Self>) {
        info!("Refresh worker started");

        loop {
            if self.shutdown.is_cancelled() {
                self.pending.lock().stop();
                break;
            }

            let next = self.pending.lock().drain();
            let Some(pass) = next else {
                break;
            };
            self.run_pass(pass).await;
        }

        self.idle.notify_waiters();
        info!("Refresh worker stopped");
    }

    #[instrument(skip_all, fields(watched = pass.watch_set.len()))]
    async fn run_pass(self: &Arc<Self>, pass: PendingPass) {
        // passes run at the trigger instant of the drained snapshot
        let now_utc = pass.requested_at.unwrap_or_else(|| self.ports.clock.now());
        let now = now_utc.with_timezone(&self.zone);
        debug!(%now_utc, "running pass");

        let events = self.fetch(now_utc).await;
        match plan_pass(&events, &pass.watch_set, &now, &self.options) {
            RefreshPlan::Skip => {
                debug!("pass skipped, display unchanged");
            }
            RefreshPlan::Render { model, wake_at } => {
                self.push(pass.targets, model).await;
                self.arm(wake_at.with_timezone(&Utc));
            }
        }
    }

    async fn fetch(&self, now: DateTime<Utc>) -> Vec<EventInstance> {
        let query = self.ports.source.upcoming_instances(
            now,
            now + self.lookahead,
            self.max_instances,
        );

        match tokio::time::timeout(self.config.source_timeout, query).await {
            Ok(Ok(events)) => events,
            Ok(Err(err)) => {
                warn!(error = %err, kind = err.label(), "event source failed, treating as empty");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.source_timeout.as_secs(),
                    "event source timed out, treating as empty"
                );
                Vec::new()
            }
        }
    }

    async fn push(&self, targets: SurfaceTargets, model: DisplayModel) {
        let unchanged = self
            .last_rendered
            .lock()
            .as_ref()
            .is_some_and(|(last_targets, last_model)| *last_targets == targets && *last_model == model);
        if unchanged {
            debug!("model unchanged, not re-rendering");
            return;
        }

        let render = self.ports.sink.render(&targets, &model);
        match tokio::time::timeout(self.config.render_timeout, render).await {
            Ok(Ok(())) => {
                *self.last_rendered.lock() = Some((targets, model));
            }
            Ok(Err(err)) => warn!(error = %err, "render sink failed"),
            Err(_) => warn!(
                timeout_secs = self.config.render_timeout.as_secs(),
                "render sink timed out"
            ),
        }
    }

    fn arm(self: &Arc<Self>, at: DateTime<Utc>) {
        if self.shutdown.is_cancelled() {
            return;
        }

        let weak: Weak<Self> = Arc::downgrade(self);
        let wake: WakeFn = Arc::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let request = UpdateRequest::full(inner.ports.clock.now());
            if let Err(err) = Self::submit(&inner, request) {
                debug!(error = %err, "deadline fired after shutdown");
            }
        });

        if let Err(err) = self.ports.timer.schedule(at, wake) {
            warn!(error = %err, %at, "failed to arm deadline");
        }
    }
}
