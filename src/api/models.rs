// src/api/models.rs

//! Wire shapes for the v3 task endpoints. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::types::TaskState;

/// Body of `POST /v3/apps/:guid/tasks`.
#[derive(Debug, Clone, Serialize)]
pub struct RunTaskRequest {
    pub command: String,
}

/// The subset of a task resource needed to follow it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskResource {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_results: u64,
}

/// Response of `GET /v3/apps/:guid/tasks?names=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginatedTasks {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub resources: Vec<TaskResource>,
}

/// Response of `GET /v3/tasks/:guid`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatus {
    #[serde(default = "unknown_state")]
    pub state: TaskState,
}

fn unknown_state() -> TaskState {
    TaskState::InFlight(String::new())
}
