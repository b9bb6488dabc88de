//! Logging setup
//!
//! Installs a `tracing-subscriber` fmt subscriber. `RUST_LOG`, when set,
//! overrides the filter passed in by the caller.

use std::str::FromStr;

use nextup_domain::{NextupError, Result};
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

nextup_domain::impl_status_conversions!(LogFormat {
    Plain => "plain",
    Json => "json",
});

/// Install the global subscriber
///
/// `default_filter` uses `EnvFilter` directive syntax (e.g.
/// `"info,nextup_core=debug"`).
///
/// # Errors
/// Returns `NextupError::Config` for an invalid filter and
/// `NextupError::Internal` if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| NextupError::Config(format!("Invalid log filter {default_filter:?}: {e}")))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| NextupError::Internal(format!("Failed to install subscriber: {e}")))
}

/// Parse a format name, defaulting to plain output for unknown names
pub fn log_format_or_default(name: Option<&str>) -> LogFormat {
    name.and_then(|n| LogFormat::from_str(n).ok()).unwrap_or_default()
}
