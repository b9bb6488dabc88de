//! Refresh runtime
//!
//! - [`RefreshCoordinator`]: coalesces update requests and runs passes on a
//!   single worker task
//! - [`TokioDeadlineTimer`]: cancel-then-set one-shot wake-up
//!
//! Runtime rules: join handles are tracked, cancellation is explicit, and
//! every collaborator call is wrapped in a timeout.

pub mod coordinator;
pub mod error;
pub mod pending;
pub mod timer;

pub use coordinator::{CoordinatorConfig, RefreshCoordinator, RefreshPorts};
pub use error::{RefreshError, RefreshResult};
pub use pending::{PendingPass, PendingUpdates};
pub use timer::TokioDeadlineTimer;
