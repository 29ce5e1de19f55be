#![allow(dead_code)]

//! Canned platform API response bodies.

/// Body returned by `POST /v3/apps/:guid/tasks`.
pub fn task_json(guid: &str, name: &str) -> String {
    format!(
        r#"{{
  "guid": "{guid}",
  "sequence_id": 1,
  "name": "{name}",
  "command": "echo hello",
  "state": "RUNNING",
  "memory_in_mb": 256
}}"#
    )
}

/// Body returned by `GET /v3/apps/:guid/tasks?names=...`.
pub fn task_list_json(tasks: &[(&str, &str)]) -> String {
    let resources: Vec<String> = tasks
        .iter()
        .map(|(guid, name)| format!(r#"{{"guid":"{guid}","name":"{name}","state":"RUNNING"}}"#))
        .collect();
    format!(
        r#"{{
  "pagination": {{ "total_results": {}, "total_pages": 1 }},
  "resources": [{}]
}}"#,
        tasks.len(),
        resources.join(",")
    )
}

/// Body returned by `GET /v3/tasks/:guid`.
pub fn status_json(guid: &str, state: &str) -> String {
    format!(
        r#"{{
  "guid": "{guid}",
  "state": "{state}",
  "result": {{ "failure_reason": null }}
}}"#
    )
}

/// A `FAILED` status carrying a failure reason.
pub fn failed_status_json(guid: &str, reason: &str) -> String {
    format!(
        r#"{{
  "guid": "{guid}",
  "state": "FAILED",
  "result": {{ "failure_reason": "{reason}" }}
}}"#
    )
}

/// Error body the API returns for rejected requests.
pub fn api_error_json(detail: &str) -> String {
    format!(
        r#"{{"errors":[{{"code":10008,"title":"CF-UnprocessableEntity","detail":"{detail}"}}]}}"#
    )
}
