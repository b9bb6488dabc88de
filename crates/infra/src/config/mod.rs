//! Configuration loading and validation
//!
//! Configuration comes from `NEXTUP_*` environment variables or from a
//! JSON/TOML file; either way it is validated before use.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths, validate};
