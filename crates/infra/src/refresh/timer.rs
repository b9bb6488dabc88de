//! One-shot deadline timer on the Tokio runtime
//!
//! Only one wake-up is ever armed. Scheduling cancels the previous one
//! before arming the next, so a late firing of a superseded deadline can
//! never reach the callback.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use nextup_core::{Clock, DeadlineTimer, WakeFn};
use nextup_domain::Result;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::error::{RefreshError, RefreshResult};

#[derive(Debug)]
struct Armed {
    generation: u64,
    at: DateTime<Utc>,
    cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct TimerState {
    generation: u64,
    armed: Option<Armed>,
}

/// [`DeadlineTimer`] backed by `tokio::time::sleep`
///
/// Delays are measured against the injected [`Clock`] at scheduling time;
/// the sleep itself runs on Tokio's clock, so paused-time tests drive it
/// with `tokio::time::advance`.
pub struct TokioDeadlineTimer {
    clock: Arc<dyn Clock>,
    runtime: Handle,
    state: Arc<Mutex<TimerState>>,
}

impl TokioDeadlineTimer {
    /// Create a timer bound to the current Tokio runtime.
    ///
    /// # Errors
    /// Returns [`RefreshError::NoRuntime`] outside a runtime context.
    pub fn new(clock: Arc<dyn Clock>) -> RefreshResult<Self> {
        let runtime = Handle::try_current().map_err(|_| RefreshError::NoRuntime)?;
        Ok(Self { clock, runtime, state: Arc::new(Mutex::new(TimerState::default())) })
    }

    fn delay_until(&self, at: DateTime<Utc>) -> Duration {
        (at - self.clock.now()).to_std().unwrap_or(Duration::ZERO)
    }
}

impl DeadlineTimer for TokioDeadlineTimer {
    fn schedule(&self, at: DateTime<Utc>, wake: WakeFn) -> Result<()> {
        let delay = self.delay_until(at);
        let cancel = CancellationToken::new();

        let generation = {
            let mut state = self.state.lock();
            if let Some(previous) = state.armed.take() {
                previous.cancel.cancel();
            }
            state.generation += 1;
            state.armed = Some(Armed { generation: state.generation, at, cancel: cancel.clone() });
            state.generation
        };

        debug!(%at, delay_secs = delay.as_secs(), "deadline armed");

        let state = Arc::clone(&self.state);
        self.runtime.spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    trace!(generation, "deadline cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    {
                        let mut state = state.lock();
                        let current = state.armed.as_ref().map(|armed| armed.generation);
                        if current != Some(generation) {
                            return;
                        }
                        state.armed = None;
                    }
                    debug!(generation, "deadline reached");
                    wake();
                }
            }
        });

        Ok(())
    }

    fn cancel(&self) {
        if let Some(armed) = self.state.lock().armed.take() {
            armed.cancel.cancel();
            debug!(at = %armed.at, "deadline cancelled");
        }
    }

    fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().armed.as_ref().map(|armed| armed.at)
    }
}

impl Drop for TokioDeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
