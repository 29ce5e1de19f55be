// src/host/backend.rs

//! Pluggable host abstraction.
//!
//! The API layer and the poller talk to a `PlatformHost` instead of spawning
//! `cf` directly, so tests can provide a scripted host that returns canned
//! responses and log envelopes.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};

use crate::errors::Result;
use crate::host::logs::LogEnvelope;

/// Boxed future returned by `PlatformHost` methods.
pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Authenticated access to the platform, as provided by the host CLI.
pub trait PlatformHost: Send + Sync {
    /// Run `curl` with the given arguments against the platform API and
    /// return the response body as lines, without echoing to the terminal.
    fn curl(&self, args: Vec<String>) -> HostFuture<'_, Vec<String>>;

    /// Resolve an application name to its GUID in the targeted space.
    fn app_guid(&self, app_name: &str) -> HostFuture<'_, String>;

    /// Start streaming the application's logs.
    fn tail_logs(&self, app_name: &str) -> HostFuture<'_, LogStream>;
}

/// A live log subscription.
///
/// Dropping the stream stops the underlying subscription.
#[derive(Debug)]
pub struct LogStream {
    pub messages: mpsc::Receiver<LogEnvelope>,
    pub errors: mpsc::Receiver<String>,
    _stop: Option<oneshot::Sender<()>>,
}

impl LogStream {
    pub fn new(
        messages: mpsc::Receiver<LogEnvelope>,
        errors: mpsc::Receiver<String>,
    ) -> Self {
        Self {
            messages,
            errors,
            _stop: None,
        }
    }

    /// Attach a stop handle; the producer treats the sender being dropped as
    /// a request to shut down.
    pub fn with_stop(mut self, stop: oneshot::Sender<()>) -> Self {
        self._stop = Some(stop);
        self
    }
}
