// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Locate and load a config file from disk (`loader.rs`).
//! - Validate it into the settings the poller uses (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_effective, load_from_path, resolve_config_path};
pub use model::{Config, HostSection, LogsSection, PollSection, RawConfigFile};
