// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Configuration as read from a TOML file.
///
/// ```toml
/// [poll]
/// initial_interval = "1s"
/// max_interval = "30s"
///
/// [host]
/// binary = "cf"
///
/// [logs]
/// enabled = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub poll: PollSection,

    #[serde(default)]
    pub host: HostSection,

    #[serde(default)]
    pub logs: LogsSection,
}

/// `[poll]` section: status polling backoff.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    /// Delay before the first status request.
    #[serde(default = "default_initial_interval")]
    pub initial_interval: String,

    /// Upper bound for the doubled delay.
    #[serde(default = "default_max_interval")]
    pub max_interval: String,
}

fn default_initial_interval() -> String {
    "1s".to_string()
}

fn default_max_interval() -> String {
    "30s".to_string()
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            initial_interval: default_initial_interval(),
            max_interval: default_max_interval(),
        }
    }
}

/// `[host]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostSection {
    /// Host CLI executable, resolved through `PATH` when not absolute.
    #[serde(default = "default_binary")]
    pub binary: String,
}

fn default_binary() -> String {
    "cf".to_string()
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            binary: default_binary(),
        }
    }
}

/// `[logs]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsSection {
    /// Relay the task's stdout/stderr while waiting.
    #[serde(default = "default_logs_enabled")]
    pub enabled: bool,
}

fn default_logs_enabled() -> bool {
    true
}

impl Default for LogsSection {
    fn default() -> Self {
        Self {
            enabled: default_logs_enabled(),
        }
    }
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// `Config::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub cf_binary: String,
    pub relay_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
            cf_binary: default_binary(),
            relay_logs: default_logs_enabled(),
        }
    }
}

impl Config {
    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, cf_binary: Option<String>, no_logs: bool) -> Self {
        if let Some(binary) = cf_binary {
            self.cf_binary = binary;
        }
        if no_logs {
            self.relay_logs = false;
        }
        self
    }
}
