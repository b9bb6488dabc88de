//! Run a single refresh pass over an event file and print the outcome.
//!
//! Run with: `nextup-preview <events.json> [--at <rfc3339>] [--config <path>]
//! [--watch <id,id,...>]`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Duration, Utc};
use nextup_core::{parse_zone, plan_pass, EventSource, PassOptions, RefreshPlan};
use nextup_domain::{Config, EventId, WatchSet};
use nextup_infra::config;
use nextup_infra::observability::{init_tracing, log_format_or_default};
use nextup_infra::source::InMemoryEventSource;

#[derive(Debug, Default)]
struct Args {
    events: Option<PathBuf>,
    at: Option<DateTime<Utc>>,
    config: Option<PathBuf>,
    watch: WatchSet,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--at" => {
                let value = raw.next().ok_or_else(|| anyhow!("--at needs a timestamp"))?;
                let at = DateTime::parse_from_rfc3339(&value)
                    .with_context(|| format!("invalid --at timestamp {value:?}"))?;
                args.at = Some(at.with_timezone(&Utc));
            }
            "--config" => {
                let value = raw.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                args.config = Some(PathBuf::from(value));
            }
            "--watch" => {
                let value = raw.next().ok_or_else(|| anyhow!("--watch needs ids"))?;
                for id in value.split(',').filter(|id| !id.trim().is_empty()) {
                    let id: i64 =
                        id.trim().parse().with_context(|| format!("invalid event id {id:?}"))?;
                    args.watch.insert(EventId(id));
                }
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path if args.events.is_none() => args.events = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument {extra}"),
        }
    }

    Ok(args)
}

fn load_config(path: Option<PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    };

    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "using default configuration");
        Config::default()
    })
}

async fn run(args: Args) -> anyhow::Result<()> {
    let events_path = args.events.context("missing event file argument")?;
    let config = load_config(args.config);
    let zone = parse_zone(&config.schedule.timezone)?;

    let source = InMemoryEventSource::from_json_file(zone, &events_path)?;
    let now_utc = args.at.unwrap_or_else(Utc::now);
    let window_end = now_utc + Duration::days(i64::from(config.schedule.lookahead_days));
    let events =
        source.upcoming_instances(now_utc, window_end, config.schedule.max_instances).await?;

    let now = now_utc.with_timezone(&zone);
    let plan = plan_pass(&events, &args.watch, &now, &PassOptions::from_config(&config));

    let output = match plan {
        RefreshPlan::Skip => serde_json::json!({ "action": "skip", "now": now.to_rfc3339() }),
        RefreshPlan::Render { model, wake_at } => serde_json::json!({
            "action": "render",
            "now": now.to_rfc3339(),
            "wake_at": wake_at.to_rfc3339(),
            "instances": events.len(),
            "model": model,
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let format = log_format_or_default(std::env::var("NEXTUP_LOG_FORMAT").ok().as_deref());
    if let Err(err) = init_tracing("warn", format) {
        eprintln!("Logging disabled: {err}");
    }

    let result = match parse_args(std::env::args().skip(1)) {
        Ok(args) => run(args).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nextup-preview failed: {e:#}");
            eprintln!("usage: nextup-preview <events.json> [--at <rfc3339>] [--config <path>] [--watch <ids>]");
            ExitCode::FAILURE
        }
    }
}
