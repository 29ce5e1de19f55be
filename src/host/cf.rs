// src/host/cf.rs

//! Production host backed by the `cf` executable.

use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::errors::{Result, RunAndWaitError};
use crate::host::backend::{HostFuture, LogStream, PlatformHost};
use crate::host::logs::parse_log_line;

const LOG_CHANNEL_CAPACITY: usize = 256;

/// Runs host operations by invoking `cf` as a subprocess.
///
/// The subprocess inherits the environment, so `CF_HOME` and the user's
/// login session and target apply as usual.
#[derive(Debug, Clone)]
pub struct CfCliHost {
    binary: String,
}

impl CfCliHost {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run `cf <args>` to completion and return its stdout.
    async fn output(&self, args: Vec<String>) -> Result<String> {
        debug!(binary = %self.binary, ?args, "invoking host command");

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("spawning `{}`", self.binary))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // `cf` reports most failures on stdout ("FAILED" + reason).
            let detail = if stderr.is_empty() {
                stdout.trim().to_string()
            } else {
                stderr
            };
            return Err(RunAndWaitError::HostError {
                command: format!("{} {}", self.binary, args.join(" ")),
                stderr: detail,
            });
        }

        Ok(stdout)
    }
}

impl PlatformHost for CfCliHost {
    fn curl(&self, args: Vec<String>) -> HostFuture<'_, Vec<String>> {
        Box::pin(async move {
            let mut full = Vec::with_capacity(args.len() + 1);
            full.push("curl".to_string());
            full.extend(args);

            let out = self.output(full).await?;
            Ok(out.lines().map(str::to_string).collect())
        })
    }

    fn app_guid(&self, app_name: &str) -> HostFuture<'_, String> {
        let app_name = app_name.to_string();
        Box::pin(async move {
            let out = self
                .output(vec!["app".to_string(), app_name.clone(), "--guid".to_string()])
                .await?;
            let guid = out.trim().to_string();
            if guid.is_empty() {
                return Err(RunAndWaitError::HostError {
                    command: format!("{} app {} --guid", self.binary, app_name),
                    stderr: "no app GUID returned".to_string(),
                });
            }
            Ok(guid)
        })
    }

    fn tail_logs(&self, app_name: &str) -> HostFuture<'_, LogStream> {
        let app_name = app_name.to_string();
        Box::pin(async move {
            let mut child = Command::new(&self.binary)
                .arg("logs")
                .arg(&app_name)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .spawn()
                .with_context(|| format!("spawning `{} logs {}`", self.binary, app_name))?;

            let stdout = child
                .stdout
                .take()
                .context("log stream has no stdout pipe")?;
            let stderr = child.stderr.take();

            let (msg_tx, msg_rx) = mpsc::channel(LOG_CHANNEL_CAPACITY);
            let (err_tx, err_rx) = mpsc::channel(LOG_CHANNEL_CAPACITY);
            let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

            // Stderr of the log process is reported as stream errors.
            if let Some(stderr) = stderr {
                let err_tx = err_tx.clone();
                tokio::spawn(async move {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        if !line.trim().is_empty() && err_tx.send(line).await.is_err() {
                            break;
                        }
                    }
                });
            }

            tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                loop {
                    tokio::select! {
                        line = lines.next_line() => {
                            match line {
                                Ok(Some(line)) => {
                                    let Some(env) = parse_log_line(&line) else {
                                        debug!("skipping log line: {}", line);
                                        continue;
                                    };
                                    if msg_tx.send(env).await.is_err() {
                                        break;
                                    }
                                }
                                Ok(None) => {
                                    let _ = err_tx.send("log stream closed".to_string()).await;
                                    break;
                                }
                                Err(e) => {
                                    let _ = err_tx.send(e.to_string()).await;
                                    break;
                                }
                            }
                        }
                        // Fires when the `LogStream` (and its stop sender) is dropped.
                        _ = &mut stop_rx => break,
                    }
                }

                if let Err(e) = child.kill().await {
                    debug!(error = %e, "log process already exited");
                }
                match child.wait().await {
                    Ok(status) => debug!(?status, "log process exited"),
                    Err(e) => warn!(error = %e, "failed to reap log process"),
                }
            });

            Ok(LogStream::new(msg_rx, err_rx).with_stop(stop_tx))
        })
    }
}
