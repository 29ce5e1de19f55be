// src/lib.rs

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod errors;
pub mod host;
pub mod logging;
pub mod metadata;
pub mod types;

use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::load_effective;
use crate::engine::{StdioSink, WaitSettings};
use crate::errors::Result;
use crate::host::CfCliHost;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the `cf`-backed host
/// - dispatch to the selected subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    if let Command::Metadata = args.command {
        let json = serde_json::to_string_pretty(&metadata::plugin_metadata())?;
        println!("{json}");
        return Ok(());
    }

    let cfg = load_effective(args.config.as_deref())?
        .with_overrides(args.cf_binary.clone(), args.no_logs);
    debug!(?cfg, "effective configuration");

    let settings = WaitSettings::from(&cfg);
    let host = CfCliHost::new(cfg.cf_binary.clone());

    match args.command {
        Command::RunAndWait { app_name, command } => {
            commands::run_and_wait(&host, &app_name, &command, &settings, StdioSink).await
        }
        Command::Wait {
            app_name,
            task_name,
        } => commands::wait(&host, &app_name, &task_name, &settings, StdioSink).await,
        Command::Metadata => Ok(()),
    }
}
