//! The two-slot agenda pipeline
//!
//! A pass runs [`aggregate`] over the upcoming instances, turns the summary
//! into a [`DisplayModel`](nextup_domain::DisplayModel) with
//! [`build_model`], and computes the instant the result goes stale with
//! [`next_deadline`]. [`plan_pass`] strings the three together.

pub mod aggregator;
pub mod model_builder;
pub mod plan;
pub mod refresh;
pub mod when;

pub use aggregator::aggregate;
pub use model_builder::{build_model, ModelBuilder};
pub use plan::{plan_pass, PassOptions, RefreshPlan};
pub use refresh::next_deadline;
pub use when::{RelativeDay, WhenFormatter};
