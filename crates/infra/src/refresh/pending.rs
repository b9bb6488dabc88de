//! Coalesced update requests
//!
//! Requests arriving while a pass is running are merged into one pending
//! snapshot; the worker drains the whole snapshot at once. There is no
//! queue of historical requests.

use std::mem;

use chrono::{DateTime, Utc};
use nextup_domain::{SurfaceTargets, UpdateRequest, WatchSet};

/// Pending update parameters, guarded by the coordinator's mutex
#[derive(Debug, Default)]
pub struct PendingUpdates {
    requested: bool,
    running: bool,
    last_requested_at: Option<DateTime<Utc>>,
    targets: SurfaceTargets,
    changed: WatchSet,
    /// Set by any request without a change list; cleared on drain
    full_refresh: bool,
}

/// One drained snapshot, consumed by a single pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPass {
    /// Union of the merged requests' targets
    pub targets: SurfaceTargets,
    /// Empty for a full refresh
    pub watch_set: WatchSet,
    /// Latest trigger instant seen so far
    pub requested_at: Option<DateTime<Utc>>,
}

impl PendingUpdates {
    /// Fold a request into the pending snapshot.
    pub fn merge(&mut self, request: UpdateRequest) {
        self.requested = true;
        self.targets = mem::take(&mut self.targets).merge(request.targets);
        match request.changed_events {
            Some(ids) if !ids.is_empty() => self.changed.extend(ids),
            _ => self.full_refresh = true,
        }
        self.last_requested_at = self.last_requested_at.max(Some(request.requested_at));
    }

    /// Mark a worker as running; `false` if one already is.
    pub fn claim_worker(&mut self) -> bool {
        !mem::replace(&mut self.running, true)
    }

    /// Take the pending snapshot, or mark the worker stopped when there is
    /// nothing to do.
    pub fn drain(&mut self) -> Option<PendingPass> {
        if !self.requested {
            self.running = false;
            return None;
        }

        self.requested = false;
        let changed = mem::take(&mut self.changed);
        let watch_set =
            if mem::replace(&mut self.full_refresh, false) { WatchSet::new() } else { changed };

        Some(PendingPass {
            targets: mem::take(&mut self.targets),
            watch_set,
            requested_at: self.last_requested_at,
        })
    }

    /// Abandon pending work and mark the worker stopped.
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Whether a worker owns the snapshot.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a request arrived since the last drain.
    pub fn has_pending(&self) -> bool {
        self.requested
    }
}
