//! Domain types and models

pub mod event;
pub mod model;
pub mod record;
pub mod request;
pub mod summary;

pub use event::{EventId, EventInstance};
pub use model::{DisplayModel, EventSlot, LaunchTarget};
pub use record::{AttendeeStatus, EventRecord};
pub use request::{SurfaceId, SurfaceTargets, UpdateRequest, WatchSet};
pub use summary::{AggregationSummary, StartGroup};
