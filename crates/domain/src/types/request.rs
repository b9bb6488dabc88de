//! Update requests accepted by the refresh coordinator

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventId;

/// Identifier of one render surface (one placed widget instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u32);

/// Identifiers whose events changed since the last pass.
pub type WatchSet = HashSet<EventId>;

/// Surfaces a pass should be pushed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceTargets {
    All,
    Only(BTreeSet<SurfaceId>),
}

impl SurfaceTargets {
    /// Union of two target sets; `All` absorbs everything.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::All, _) | (_, Self::All) => Self::All,
            (Self::Only(mut a), Self::Only(b)) => {
                a.extend(b);
                Self::Only(a)
            }
        }
    }
}

impl Default for SurfaceTargets {
    fn default() -> Self {
        Self::Only(BTreeSet::new())
    }
}

/// A request to recompute the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Surfaces to push the result to
    pub targets: SurfaceTargets,
    /// `None` requests a full refresh; `Some` names the events known to have
    /// changed, letting a pass skip rendering when none of them matter
    pub changed_events: Option<Vec<EventId>>,
    /// Instant the pass is evaluated at
    pub requested_at: DateTime<Utc>,
}

impl UpdateRequest {
    /// Full refresh of every surface.
    pub fn full(requested_at: DateTime<Utc>) -> Self {
        Self { targets: SurfaceTargets::All, changed_events: None, requested_at }
    }

    /// Full refresh of specific surfaces.
    pub fn for_surfaces(
        surfaces: impl IntoIterator<Item = SurfaceId>,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            targets: SurfaceTargets::Only(surfaces.into_iter().collect()),
            changed_events: None,
            requested_at,
        }
    }

    /// Refresh triggered by edits to specific events.
    pub fn for_changed_events(
        events: impl IntoIterator<Item = EventId>,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            targets: SurfaceTargets::All,
            changed_events: Some(events.into_iter().collect()),
            requested_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_merge_all_absorbs() {
        let only = SurfaceTargets::Only([SurfaceId(1)].into_iter().collect());
        assert_eq!(only.clone().merge(SurfaceTargets::All), SurfaceTargets::All);
        assert_eq!(SurfaceTargets::All.merge(only), SurfaceTargets::All);
    }

    #[test]
    fn test_targets_merge_union() {
        let a = SurfaceTargets::Only([SurfaceId(1), SurfaceId(2)].into_iter().collect());
        let b = SurfaceTargets::Only([SurfaceId(2), SurfaceId(5)].into_iter().collect());
        let expected: BTreeSet<_> = [SurfaceId(1), SurfaceId(2), SurfaceId(5)].into_iter().collect();
        assert_eq!(a.merge(b), SurfaceTargets::Only(expected));
    }
}
