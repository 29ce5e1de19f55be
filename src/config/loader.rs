// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{Config, RawConfigFile};
use crate::errors::Result;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "RUN_AND_WAIT_CONFIG";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to
/// get a usable [`Config`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let raw_config = load_from_path(&path)?;
    let config = Config::try_from(raw_config)?;
    Ok(config)
}

/// Decide which config file (if any) to read.
///
/// - An explicit path (from `--config`) always wins and must exist.
/// - Otherwise `RUN_AND_WAIT_CONFIG`, if set.
/// - Otherwise `RunAndWait.toml` in the current working directory, but only
///   when it exists; the tool works without any config file.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(PathBuf::from(p));
    }
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        if !p.trim().is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    let fallback = default_config_path();
    if fallback.is_file() {
        return Some(fallback);
    }
    None
}

/// Load the effective configuration: the resolved file if there is one,
/// built-in defaults otherwise.
pub fn load_effective(explicit: Option<&str>) -> Result<Config> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_and_validate(path)
        }
        None => {
            debug!("no config file found; using defaults");
            Ok(Config::default())
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("RunAndWait.toml")
}
