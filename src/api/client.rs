// src/api/client.rs

use tracing::debug;

use crate::api::models::{PaginatedTasks, RunTaskRequest, TaskResource, TaskStatus};
use crate::errors::{Result, RunAndWaitError};
use crate::host::PlatformHost;
use crate::types::TaskState;

const JSON_CONTENT_TYPE: &str = "Content-Type: application/json";

/// A resolved application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub name: String,
    pub guid: String,
}

/// One status poll: the decoded state plus the raw response text.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub state: TaskState,
    pub raw: String,
}

/// Task operations on top of a `PlatformHost`.
pub struct TaskApi<'a, H: PlatformHost + ?Sized> {
    host: &'a H,
}

impl<'a, H: PlatformHost + ?Sized> TaskApi<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host }
    }

    /// Look up an application's GUID by name.
    pub async fn resolve_app(&self, app_name: &str) -> Result<App> {
        let guid = self.host.app_guid(app_name).await?;
        Ok(App {
            name: app_name.to_string(),
            guid,
        })
    }

    /// Start `command` as a new task on the app.
    ///
    /// Fails with `EmptyTaskId` when the response carries no GUID, which is
    /// how API errors (returned as JSON bodies) surface.
    pub async fn create_task(&self, app_guid: &str, command: &str) -> Result<TaskResource> {
        let body = serde_json::to_string(&RunTaskRequest {
            command: command.to_string(),
        })?;

        let out = self
            .host
            .curl(vec![
                "-H".to_string(),
                JSON_CONTENT_TYPE.to_string(),
                "-d".to_string(),
                body,
                "-X".to_string(),
                "POST".to_string(),
                format!("/v3/apps/{app_guid}/tasks"),
            ])
            .await?;

        let task: TaskResource = serde_json::from_str(&out.join("\n"))?;
        ensure_guid(task)
    }

    /// Find the single task on the app with the given name.
    pub async fn find_task_by_name(&self, app_guid: &str, name: &str) -> Result<TaskResource> {
        let out = self
            .host
            .curl(vec![
                "-H".to_string(),
                JSON_CONTENT_TYPE.to_string(),
                format!(
                    "/v3/apps/{app_guid}/tasks?names={}",
                    urlencoding::encode(name)
                ),
            ])
            .await?;

        let list: PaginatedTasks = serde_json::from_str(&out.join("\n"))?;
        let count = list.pagination.total_results;
        if count != 1 {
            return Err(RunAndWaitError::TaskCount {
                name: name.to_string(),
                count,
            });
        }

        let task = list
            .resources
            .into_iter()
            .next()
            .ok_or(RunAndWaitError::EmptyTaskId)?;
        ensure_guid(task)
    }

    /// Fetch the current state of a task.
    pub async fn task_status(&self, task_guid: &str) -> Result<StatusReport> {
        let out = self
            .host
            .curl(vec![format!("/v3/tasks/{task_guid}")])
            .await?;
        let raw = out.join("\n");

        let status: TaskStatus = serde_json::from_str(&raw)?;
        debug!(task = %task_guid, state = %status.state, "polled task status");

        Ok(StatusReport {
            state: status.state,
            raw,
        })
    }
}

fn ensure_guid(task: TaskResource) -> Result<TaskResource> {
    if task.guid.is_empty() {
        return Err(RunAndWaitError::EmptyTaskId);
    }
    Ok(task)
}
