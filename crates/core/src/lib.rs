//! # Nextup Core
//!
//! Pure agenda logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Local time conversion and the flip-point rule
//! - Event aggregation, display model construction, refresh deadlines
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `nextup-domain`
//! - No I/O, timers, or runtime code
//! - All external dependencies via traits
//! - Every function here is total and deterministic given `now`

pub mod agenda;
pub mod clock;
pub mod ports;
pub mod time;

pub use agenda::{
    aggregate, build_model, next_deadline, plan_pass, ModelBuilder, PassOptions, RefreshPlan,
};
pub use clock::{Clock, MockClock, SystemClock};
pub use ports::{DeadlineTimer, EventSource, RenderSink, WakeFn};
pub use time::{flip_point, local_span, parse_zone, start_of_next_local_day, to_local};
