// src/logging.rs

//! Diagnostic output for `cf-run-and-wait`.
//!
//! Progress lines ("Getting app id...", "Task ID / Name: ...") go through
//! `tracing` to STDERR; STDOUT carries only the task's own output relayed
//! from the log stream.
//!
//! The filter comes from `--log-level` when given, otherwise from
//! `RUN_AND_WAIT_LOG`, which accepts full `EnvFilter` directives
//! (e.g. `"debug"` or `"run_and_wait::host=trace,info"`), otherwise `info`.

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "RUN_AND_WAIT_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

/// Resolve the filter: the CLI level wins over the environment value.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return Ok(EnvFilter::new(level.directive()));
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} value '{directives}'")),
        None => Ok(EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}
