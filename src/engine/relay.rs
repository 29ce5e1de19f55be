// src/engine/relay.rs

//! Background relay of a task's log output.

use std::io::Write;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::host::{LogEnvelope, LogStream};
use crate::types::MessageType;

/// Destination for relayed log messages.
pub trait LogSink: Send {
    fn write_out(&mut self, message: &str);
    fn write_err(&mut self, message: &str);
}

/// Writes `OUT` messages to stdout and `ERR` messages to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioSink;

impl LogSink for StdioSink {
    fn write_out(&mut self, message: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{message}");
        let _ = out.flush();
    }

    fn write_err(&mut self, message: &str) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{message}");
    }
}

/// Source type the platform assigns to a task's log lines.
pub fn task_source_type(task_name: &str) -> String {
    format!("APP/TASK/{task_name}")
}

/// Spawn the relay.
///
/// Only envelopes whose source type is `APP/TASK/<task_name>` are written to
/// `sink`. Stream errors are logged and do not stop the relay. The relay ends
/// when `cancel_rx` fires (or its sender is dropped); messages and errors
/// already buffered at that point are still handled.
pub fn spawn_relay<S>(
    mut stream: LogStream,
    task_name: &str,
    mut sink: S,
    mut cancel_rx: oneshot::Receiver<()>,
) -> JoinHandle<()>
where
    S: LogSink + 'static,
{
    let target = task_source_type(task_name);

    tokio::spawn(async move {
        debug!(source_type = %target, "log relay started");

        loop {
            tokio::select! {
                _ = &mut cancel_rx => {
                    while let Ok(env) = stream.messages.try_recv() {
                        relay_one(&target, &env, &mut sink);
                    }
                    log_pending_errors(&mut stream);
                    break;
                }
                msg = stream.messages.recv() => match msg {
                    Some(env) => relay_one(&target, &env, &mut sink),
                    None => {
                        debug!("log stream ended");
                        log_pending_errors(&mut stream);
                        // Keep waiting for cancellation so the caller's
                        // shutdown path stays the same.
                        let _ = (&mut cancel_rx).await;
                        break;
                    }
                },
                Some(e) = stream.errors.recv() => log_stream_error(&e),
            }
        }

        debug!(source_type = %target, "log relay stopped");
    })
}

fn log_stream_error(e: &str) {
    warn!("error reading logs: {e}");
}

fn log_pending_errors(stream: &mut LogStream) {
    while let Ok(e) = stream.errors.try_recv() {
        log_stream_error(&e);
    }
}

fn relay_one<S: LogSink>(target: &str, env: &LogEnvelope, sink: &mut S) {
    if env.source_type != target {
        return;
    }
    match env.message_type {
        MessageType::Out => sink.write_out(&env.message),
        MessageType::Err => sink.write_err(&env.message),
    }
}
