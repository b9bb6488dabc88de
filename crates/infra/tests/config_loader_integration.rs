//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use nextup_domain::NextupError;
use nextup_infra::config;

fn temp_config(contents: &str, extension: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("nextup")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    file
}

#[test]
fn test_load_config_from_json_file() {
    let file = temp_config(
        r#"{
            "schedule": {
                "timezone": "Australia/Adelaide",
                "lookahead_days": 3,
                "max_instances": 6,
                "fallback_refresh_secs": 1800
            },
            "display": {
                "use_24_hour_clock": true,
                "labels": { "no_title": "Untitled" }
            }
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(file.path().to_path_buf()))
        .expect("Failed to load config from JSON file");

    assert_eq!(config.schedule.timezone, "Australia/Adelaide");
    assert_eq!(config.schedule.lookahead_days, 3);
    assert_eq!(config.schedule.max_instances, 6);
    assert_eq!(config.schedule.fallback_refresh_secs, 1800);
    assert!(config.display.use_24_hour_clock);
    assert_eq!(config.display.labels.no_title, "Untitled");
    assert_eq!(config.display.labels.tomorrow, "Tomorrow");
}

#[test]
fn test_load_config_from_toml_file() {
    let file = temp_config(
        r#"
[schedule]
timezone = "America/Sao_Paulo"

[display.labels]
one_more_event = "mais 1 evento"
more_events = "mais {count} eventos"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(file.path().to_path_buf()))
        .expect("Failed to load config from TOML file");

    assert_eq!(config.schedule.timezone, "America/Sao_Paulo");
    assert_eq!(config.display.labels.more_events(1), "mais 1 evento");
    assert_eq!(config.display.labels.more_events(4), "mais 4 eventos");
}

#[test]
fn test_unknown_timezone_in_file_is_rejected() {
    let file = temp_config(r#"{ "schedule": { "timezone": "Moon/Tranquility" } }"#, "json");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, NextupError::Config(msg) if msg.contains("Moon/Tranquility")));
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = temp_config("", "toml");

    let config = config::load_from_file(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config, nextup_domain::Config::default());
}
