// src/host/mod.rs

//! Boundary to the host CLI (`cf`).
//!
//! Every API call and the log stream go through the host, which owns the
//! user's login session and target.
//!
//! - [`backend`] defines the `PlatformHost` trait and the `LogStream` handle.
//! - [`cf`] is the production implementation that shells out to `cf`.
//! - [`logs`] parses streamed log lines into `LogEnvelope`s.

pub mod backend;
pub mod cf;
pub mod logs;

pub use backend::{HostFuture, LogStream, PlatformHost};
pub use cf::CfCliHost;
pub use logs::{LogEnvelope, parse_log_line};
