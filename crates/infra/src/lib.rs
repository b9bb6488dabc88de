//! # Nextup Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (environment, JSON, TOML)
//! - Logging setup
//! - An in-memory event record source
//! - The refresh coordinator and its Tokio deadline timer
//! - A tracing-backed render sink
//!
//! ## Architecture
//! - Implements traits defined in `nextup-core`
//! - Depends on `nextup-domain` and `nextup-core`
//! - Contains all "impure" code (I/O, timers, task spawning)

pub mod config;
pub mod observability;
pub mod refresh;
pub mod render;
pub mod source;

// Re-export commonly used items
pub use refresh::{RefreshCoordinator, RefreshError, RefreshPorts, TokioDeadlineTimer};
pub use render::TracingRenderSink;
pub use source::InMemoryEventSource;
