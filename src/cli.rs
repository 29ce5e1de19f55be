// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::metadata::{RUN_AND_WAIT_HELP, WAIT_HELP};

/// Command-line arguments for `cf-run-and-wait`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cf-run-and-wait",
    version,
    about = "Run a one-off task on a Cloud Foundry app, or wait for one, until it finishes.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a config file (TOML).
    ///
    /// If omitted, `RUN_AND_WAIT_CONFIG` or `RunAndWait.toml` in the current
    /// working directory is used when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Path to the `cf` binary used for API calls and log streaming.
    #[arg(long = "cf", global = true, value_name = "PATH")]
    pub cf_binary: Option<String>,

    /// Do not relay the task's log output while waiting.
    #[arg(long, global = true)]
    pub no_logs: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUN_AND_WAIT_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(name = "run-and-wait", about = RUN_AND_WAIT_HELP)]
    RunAndWait {
        /// Name of the deployed application.
        #[arg(value_name = "APPNAME")]
        app_name: String,

        /// Command to run as the task.
        #[arg(value_name = "CMD")]
        command: String,
    },

    #[command(about = WAIT_HELP)]
    Wait {
        /// Name of the deployed application.
        #[arg(value_name = "APPNAME")]
        app_name: String,

        /// Name of the task to wait for.
        #[arg(value_name = "TASK")]
        task_name: String,
    },

    /// Print plugin metadata as JSON.
    #[command(hide = true)]
    Metadata,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::try_parse()`.
///
/// Parse failures are returned rather than exiting, so `main` can map them to
/// the same exit code as every other error.
pub fn try_parse() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}
