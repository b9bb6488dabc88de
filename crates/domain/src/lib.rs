//! # Nextup Domain
//!
//! Domain types and models for the two-slot upcoming-events engine.
//!
//! This crate contains:
//! - Event data types (`EventInstance`, `EventRecord`)
//! - Aggregation and presentation models (`AggregationSummary`,
//!   `DisplayModel`)
//! - Update request types consumed by the refresh coordinator
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other Nextup crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
