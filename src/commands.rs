// src/commands.rs

//! The two user-facing flows: start a task and wait, or wait on an
//! existing one.

use tracing::info;

use crate::api::{App, TaskApi};
use crate::engine::{LogSink, WaitSettings, wait_for_completion};
use crate::errors::Result;
use crate::host::PlatformHost;

/// `run-and-wait APPNAME CMD`: start `command` as a task and wait for it.
pub async fn run_and_wait<H, S>(
    host: &H,
    app_name: &str,
    command: &str,
    settings: &WaitSettings,
    sink: S,
) -> Result<()>
where
    H: PlatformHost + ?Sized,
    S: LogSink + 'static,
{
    let api = TaskApi::new(host);
    let app = resolve_app(&api, app_name).await?;

    info!("Kicking off task...");
    let task = api.create_task(&app.guid, command).await?;
    info!("Task started...");

    wait_for_completion(host, &app, &task, settings, sink).await
}

/// `wait APPNAME TASK`: wait for the task named `task_name`.
pub async fn wait<H, S>(
    host: &H,
    app_name: &str,
    task_name: &str,
    settings: &WaitSettings,
    sink: S,
) -> Result<()>
where
    H: PlatformHost + ?Sized,
    S: LogSink + 'static,
{
    let api = TaskApi::new(host);
    let app = resolve_app(&api, app_name).await?;

    info!("Getting task id...");
    let task = api.find_task_by_name(&app.guid, task_name).await?;

    wait_for_completion(host, &app, &task, settings, sink).await
}

async fn resolve_app<H>(api: &TaskApi<'_, H>, app_name: &str) -> Result<App>
where
    H: PlatformHost + ?Sized,
{
    info!("Getting app id...");
    let app = api.resolve_app(app_name).await?;
    info!("App ID: {}", app.guid);
    Ok(app)
}
