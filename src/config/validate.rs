// src/config/validate.rs

use crate::config::model::{Config, RawConfigFile};
use crate::errors::{Result, RunAndWaitError};
use crate::types::parse_duration;

impl TryFrom<RawConfigFile> for Config {
    type Error = RunAndWaitError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let initial_interval = parse_interval("initial_interval", &raw.poll.initial_interval)?;
        let max_interval = parse_interval("max_interval", &raw.poll.max_interval)?;

        if initial_interval > max_interval {
            return Err(RunAndWaitError::ConfigError(format!(
                "[poll].initial_interval ({}) must not exceed [poll].max_interval ({})",
                raw.poll.initial_interval, raw.poll.max_interval
            )));
        }

        let cf_binary = raw.host.binary.trim().to_string();
        if cf_binary.is_empty() {
            return Err(RunAndWaitError::ConfigError(
                "[host].binary must not be empty".to_string(),
            ));
        }

        Ok(Config {
            initial_interval,
            max_interval,
            cf_binary,
            relay_logs: raw.logs.enabled,
        })
    }
}

fn parse_interval(key: &str, value: &str) -> Result<std::time::Duration> {
    let dur = parse_duration(value).map_err(|e| {
        RunAndWaitError::ConfigError(format!("[poll].{key}: {e}"))
    })?;
    if dur.is_zero() {
        return Err(RunAndWaitError::ConfigError(format!(
            "[poll].{key} must be greater than zero (got {value})"
        )));
    }
    Ok(dur)
}
