// src/engine/poller.rs

//! Status polling until a task reaches a terminal state.

use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::api::{App, TaskApi, TaskResource};
use crate::engine::WaitSettings;
use crate::engine::backoff::Backoff;
use crate::engine::relay::{LogSink, spawn_relay};
use crate::errors::{Result, RunAndWaitError};
use crate::host::PlatformHost;
use crate::types::TaskState;

/// Block until `task` finishes, relaying its logs to `sink` meanwhile.
///
/// Returns `Ok(())` on `SUCCEEDED` and `TaskFailed` on `FAILED`. Host and
/// decode errors end the wait immediately. The relay is stopped on every
/// exit path.
pub async fn wait_for_completion<H, S>(
    host: &H,
    app: &App,
    task: &TaskResource,
    settings: &WaitSettings,
    sink: S,
) -> Result<()>
where
    H: PlatformHost + ?Sized,
    S: LogSink + 'static,
{
    info!("Task ID / Name: {} / {}", task.guid, task.name);

    let relay = if settings.relay_logs {
        let stream = host.tail_logs(&app.name).await?;
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let handle = spawn_relay(stream, &task.name, sink, cancel_rx);
        Some((cancel_tx, handle))
    } else {
        debug!("log relay disabled");
        None
    };

    let api = TaskApi::new(host);
    let result = poll_until_terminal(&api, &task.guid, settings.backoff()).await;

    if let Some((cancel_tx, handle)) = relay {
        let _ = cancel_tx.send(());
        if let Err(e) = handle.await {
            warn!(error = %e, "log relay task ended abnormally");
        }
    }

    result
}

/// Poll `GET /v3/tasks/:guid`, sleeping `backoff` before every request.
///
/// There is no overall timeout: non-terminal states are retried forever.
pub async fn poll_until_terminal<H>(
    api: &TaskApi<'_, H>,
    task_guid: &str,
    mut backoff: Backoff,
) -> Result<()>
where
    H: PlatformHost + ?Sized,
{
    loop {
        sleep(backoff.current()).await;

        let report = api.task_status(task_guid).await?;

        match report.state {
            TaskState::Succeeded => {
                info!("Task succeeded");
                return Ok(());
            }
            TaskState::Failed => {
                error!("{}", report.raw);
                return Err(RunAndWaitError::TaskFailed);
            }
            TaskState::InFlight(state) => {
                let next = backoff.advance();
                debug!(%state, next_poll_in = ?next, "task still running");
            }
        }
    }
}
