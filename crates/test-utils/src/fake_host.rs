use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::Instant;

use run_and_wait::errors::RunAndWaitError;
use run_and_wait::host::{HostFuture, LogEnvelope, LogStream, PlatformHost};

/// One recorded `curl` invocation.
#[derive(Debug, Clone)]
pub struct CurlCall {
    pub args: Vec<String>,
    /// When the call was made (virtual time under `start_paused`).
    pub at: Instant,
}

impl CurlCall {
    /// The API path, which is always the last argument.
    pub fn path(&self) -> &str {
        self.args.last().map(String::as_str).unwrap_or_default()
    }
}

enum Scripted {
    Body(String),
    Fail(String),
}

#[derive(Default)]
struct Inner {
    apps: HashMap<String, String>,
    responses: VecDeque<Scripted>,
    calls: Vec<CurlCall>,
    log_messages: Vec<LogEnvelope>,
    log_errors: Vec<String>,
    fail_tail: bool,
    tail_requests: Vec<String>,
}

/// A scripted `PlatformHost`.
///
/// - `app_guid` answers from the apps registered with [`FakeHost::with_app`].
/// - `curl` pops scripted responses in order and records every call.
/// - `tail_logs` replays the configured envelopes and errors, then closes.
#[derive(Clone, Default)]
pub struct FakeHost {
    inner: Arc<Mutex<Inner>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(self, name: &str, guid: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .apps
            .insert(name.to_string(), guid.to_string());
        self
    }

    /// Queue a response body for the next `curl`.
    pub fn respond(self, body: impl Into<String>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Scripted::Body(body.into()));
        self
    }

    /// Queue a host failure for the next `curl`.
    pub fn fail_next(self, stderr: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Scripted::Fail(stderr.to_string()));
        self
    }

    pub fn with_log(self, envelope: LogEnvelope) -> Self {
        self.inner.lock().unwrap().log_messages.push(envelope);
        self
    }

    pub fn with_log_error(self, error: &str) -> Self {
        self.inner.lock().unwrap().log_errors.push(error.to_string());
        self
    }

    /// Make `tail_logs` fail.
    pub fn fail_tail_logs(self) -> Self {
        self.inner.lock().unwrap().fail_tail = true;
        self
    }

    pub fn calls(&self) -> Vec<CurlCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls to `GET /v3/tasks/:guid`.
    pub fn status_calls(&self) -> Vec<CurlCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.path().starts_with("/v3/tasks/"))
            .collect()
    }

    pub fn tail_requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().tail_requests.clone()
    }

    pub fn remaining_responses(&self) -> usize {
        self.inner.lock().unwrap().responses.len()
    }
}

impl PlatformHost for FakeHost {
    fn curl(&self, args: Vec<String>) -> HostFuture<'_, Vec<String>> {
        Box::pin(async move {
            let scripted = {
                let mut inner = self.inner.lock().unwrap();
                inner.calls.push(CurlCall {
                    args: args.clone(),
                    at: Instant::now(),
                });
                inner.responses.pop_front()
            };

            match scripted {
                Some(Scripted::Body(body)) => Ok(body.lines().map(str::to_string).collect()),
                Some(Scripted::Fail(stderr)) => Err(RunAndWaitError::HostError {
                    command: format!("cf curl {}", args.join(" ")),
                    stderr,
                }),
                None => Err(RunAndWaitError::HostError {
                    command: format!("cf curl {}", args.join(" ")),
                    stderr: "no scripted response left".to_string(),
                }),
            }
        })
    }

    fn app_guid(&self, app_name: &str) -> HostFuture<'_, String> {
        let app_name = app_name.to_string();
        Box::pin(async move {
            let guid = self.inner.lock().unwrap().apps.get(&app_name).cloned();
            guid.ok_or_else(|| RunAndWaitError::HostError {
                command: format!("cf app {app_name} --guid"),
                stderr: format!("App '{app_name}' not found."),
            })
        })
    }

    fn tail_logs(&self, app_name: &str) -> HostFuture<'_, LogStream> {
        let app_name = app_name.to_string();
        Box::pin(async move {
            let (messages, errors, fail) = {
                let mut inner = self.inner.lock().unwrap();
                inner.tail_requests.push(app_name.clone());
                (
                    inner.log_messages.clone(),
                    inner.log_errors.clone(),
                    inner.fail_tail,
                )
            };

            if fail {
                return Err(RunAndWaitError::HostError {
                    command: format!("cf logs {app_name}"),
                    stderr: "unable to connect to log stream".to_string(),
                });
            }

            let (msg_tx, msg_rx) = mpsc::channel(messages.len().max(1));
            let (err_tx, err_rx) = mpsc::channel(errors.len().max(1));
            for m in messages {
                msg_tx.send(m).await.map_err(anyhow::Error::from)?;
            }
            for e in errors {
                err_tx.send(e).await.map_err(anyhow::Error::from)?;
            }

            Ok(LogStream::new(msg_rx, err_rx))
        })
    }
}
