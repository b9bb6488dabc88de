//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `NEXTUP_TIMEZONE` is unset or a value is invalid, falls back to a
//!    file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `NEXTUP_TIMEZONE`: IANA name of the display timezone (required)
//! - `NEXTUP_LOOKAHEAD_DAYS`: Days ahead the record source searches
//! - `NEXTUP_MAX_INSTANCES`: Maximum instances fetched per pass
//! - `NEXTUP_FALLBACK_REFRESH_SECS`: Wake-up interval without a deadline
//! - `NEXTUP_USE_24_HOUR`: 24-hour clock for event times (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./nextup.{json,toml}`, then `./config.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use nextup_core::parse_zone;
use nextup_domain::{Config, NextupError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["nextup.json", "nextup.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `NextupError::Config` if neither the environment nor any probed
/// file yields a valid configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `NEXTUP_TIMEZONE` is required; everything else keeps its default
/// when unset.
///
/// # Errors
/// Returns `NextupError::Config` if the timezone is missing, a value does
/// not parse, or the result fails [`validate`].
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.schedule.timezone = env_var("NEXTUP_TIMEZONE")?;
    if let Some(days) = env_parse("NEXTUP_LOOKAHEAD_DAYS")? {
        config.schedule.lookahead_days = days;
    }
    if let Some(max) = env_parse("NEXTUP_MAX_INSTANCES")? {
        config.schedule.max_instances = max;
    }
    if let Some(secs) = env_parse("NEXTUP_FALLBACK_REFRESH_SECS")? {
        config.schedule.fallback_refresh_secs = secs;
    }
    config.display.use_24_hour_clock = env_bool("NEXTUP_USE_24_HOUR", false);

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations (see
/// [`probe_config_paths`]). Format is picked by extension.
///
/// # Errors
/// Returns `NextupError::Config` if the file is missing, cannot be read or
/// parsed, or fails [`validate`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(NextupError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            NextupError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NextupError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Check that a configuration is usable
///
/// # Errors
/// Returns `NextupError::Config` for an unknown timezone, a zero lookahead
/// window, a zero instance cap, or a zero fallback interval.
pub fn validate(config: &Config) -> Result<()> {
    let schedule = &config.schedule;
    parse_zone(&schedule.timezone)?;

    if schedule.lookahead_days == 0 {
        return Err(NextupError::Config("lookahead_days must be at least 1".to_string()));
    }
    if schedule.max_instances == 0 {
        return Err(NextupError::Config("max_instances must be at least 1".to_string()));
    }
    if schedule.fallback_refresh_secs == 0 {
        return Err(NextupError::Config("fallback_refresh_secs must be at least 1".to_string()));
    }
    Ok(())
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NextupError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NextupError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(NextupError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its parent and grandparent, then the
/// executable's directory, trying `nextup.{json,toml}` before
/// `config.{json,toml}` in each.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| NextupError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional numeric environment variable
///
/// Unset yields `Ok(None)`; set but unparsable is an error.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| NextupError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
