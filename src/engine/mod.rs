// src/engine/mod.rs

//! Waiting for a task to finish.
//!
//! - [`backoff`] computes the delay between status polls.
//! - [`relay`] forwards the task's log lines to stdout/stderr in the
//!   background.
//! - [`poller`] drives both until the task reaches a terminal state.

use std::time::Duration;

use crate::config::Config;

pub mod backoff;
pub mod poller;
pub mod relay;

pub use backoff::Backoff;
pub use poller::{poll_until_terminal, wait_for_completion};
pub use relay::{LogSink, StdioSink, spawn_relay, task_source_type};

/// Knobs for a single wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSettings {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub relay_logs: bool,
}

impl Default for WaitSettings {
    fn default() -> Self {
        WaitSettings::from(&Config::default())
    }
}

impl From<&Config> for WaitSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            initial_interval: cfg.initial_interval,
            max_interval: cfg.max_interval,
            relay_logs: cfg.relay_logs,
        }
    }
}

impl WaitSettings {
    pub fn backoff(&self) -> Backoff {
        Backoff::new(self.initial_interval, self.max_interval)
    }
}
