//! Refresh runtime error types

use nextup_domain::NextupError;
use thiserror::Error;

/// Errors raised by the refresh coordinator and deadline timer
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The coordinator has been shut down
    #[error("Refresh coordinator not running")]
    NotRunning,

    /// Operation timed out
    #[error("Operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Task join failed
    #[error("Task join failed: {0}")]
    TaskJoinFailed(String),

    /// Constructed outside a Tokio runtime
    #[error("No Tokio runtime available")]
    NoRuntime,
}

impl From<RefreshError> for NextupError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::NotRunning => Self::InvalidInput(err.to_string()),
            RefreshError::NoRuntime => Self::Config(err.to_string()),
            RefreshError::Timeout { .. } | RefreshError::TaskJoinFailed(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

/// Convenience type alias for refresh operations
pub type RefreshResult<T> = Result<T, RefreshError>;
