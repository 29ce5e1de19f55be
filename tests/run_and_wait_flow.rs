// tests/run_and_wait_flow.rs

use std::error::Error;

use run_and_wait::commands;
use run_and_wait::engine::WaitSettings;
use run_and_wait::errors::RunAndWaitError;
use run_and_wait::host::LogEnvelope;
use run_and_wait::types::MessageType;
use run_and_wait_test_utils::builders::{api_error_json, failed_status_json, status_json, task_json};
use run_and_wait_test_utils::{CaptureSink, FakeHost, LogCapture, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

fn app_host() -> FakeHost {
    FakeHost::new().with_app("myapp", "app-guid-1")
}

#[tokio::test(start_paused = true)]
async fn succeeded_task_returns_ok() -> TestResult {
    init_tracing();

    let host = app_host()
        .respond(task_json("task-1", "a1b2c3"))
        .respond(status_json("task-1", "RUNNING"))
        .respond(status_json("task-1", "SUCCEEDED"));

    commands::run_and_wait(
        &host,
        "myapp",
        "rake db:migrate",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await?;

    let calls = host.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[0].args,
        vec![
            "-H",
            "Content-Type: application/json",
            "-d",
            r#"{"command":"rake db:migrate"}"#,
            "-X",
            "POST",
            "/v3/apps/app-guid-1/tasks",
        ]
    );
    assert_eq!(calls[1].args, vec!["/v3/tasks/task-1"]);
    assert_eq!(host.remaining_responses(), 0);
    assert_eq!(host.tail_requests(), vec!["myapp"]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn command_with_quotes_is_json_encoded() -> TestResult {
    let host = app_host()
        .respond(task_json("task-1", "t"))
        .respond(status_json("task-1", "SUCCEEDED"));

    commands::run_and_wait(
        &host,
        "myapp",
        r#"echo "hello" \ world"#,
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await?;

    let body = &host.calls()[0].args[3];
    let decoded: serde_json::Value = serde_json::from_str(body)?;
    assert_eq!(decoded["command"], r#"echo "hello" \ world"#);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failed_task_returns_task_failed() {
    init_tracing();

    let host = app_host()
        .respond(task_json("task-1", "t"))
        .respond(status_json("task-1", "PENDING"))
        .respond(failed_status_json("task-1", "Exited with status 1"));

    let err = commands::run_and_wait(
        &host,
        "myapp",
        "false",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunAndWaitError::TaskFailed));
    assert_eq!(err.to_string(), "task failed");
    assert_eq!(host.status_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_task_logs_the_raw_status_body() {
    let logs = LogCapture::new();
    let _guard = logs.install();

    let host = app_host()
        .respond(task_json("task-1", "t"))
        .respond(failed_status_json("task-1", "Exited with status 3"));

    let err = commands::run_and_wait(
        &host,
        "myapp",
        "exit 3",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RunAndWaitError::TaskFailed));

    let out = logs.contents();
    assert!(out.contains("ERROR"), "{out}");
    assert!(out.contains(r#""state": "FAILED""#), "{out}");
    assert!(out.contains(r#""failure_reason": "Exited with status 3""#), "{out}");
}

#[tokio::test(start_paused = true)]
async fn progress_lines_are_logged() -> TestResult {
    let logs = LogCapture::new();
    let _guard = logs.install();

    let host = app_host()
        .respond(task_json("task-1", "a1b2"))
        .respond(status_json("task-1", "SUCCEEDED"));

    commands::run_and_wait(&host, "myapp", "echo", &WaitSettings::default(), CaptureSink::new())
        .await?;

    let out = logs.contents();
    for line in [
        "Getting app id...",
        "App ID: app-guid-1",
        "Kicking off task...",
        "Task started...",
        "Task ID / Name: task-1 / a1b2",
    ] {
        assert!(out.contains(line), "missing {line:?} in {out}");
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn malformed_create_response_fails_without_polling() {
    let host = app_host().respond("<html>502 Bad Gateway</html>");

    let err = commands::run_and_wait(
        &host,
        "myapp",
        "echo hi",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunAndWaitError::JsonError(_)));
    assert!(host.status_calls().is_empty());
    assert!(host.tail_requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn api_error_body_is_empty_task_id() {
    let host = app_host().respond(api_error_json("Insufficient memory quota"));

    let err = commands::run_and_wait(
        &host,
        "myapp",
        "echo hi",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunAndWaitError::EmptyTaskId));
    assert_eq!(err.to_string(), "Empty task ID");
    assert_eq!(host.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_app_fails_before_any_api_call() {
    let host = FakeHost::new();

    let err = commands::run_and_wait(
        &host,
        "ghost",
        "echo hi",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunAndWaitError::HostError { .. }));
    assert!(host.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn host_error_while_polling_aborts() {
    let host = app_host()
        .respond(task_json("task-1", "t"))
        .respond(status_json("task-1", "RUNNING"))
        .fail_next("Not logged in. Use 'cf login' to log in.")
        .respond(status_json("task-1", "SUCCEEDED"));

    let err = commands::run_and_wait(
        &host,
        "myapp",
        "sleep 100",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();

    match err {
        RunAndWaitError::HostError { stderr, .. } => assert!(stderr.contains("Not logged in")),
        other => panic!("expected HostError, got {other:?}"),
    }
    assert_eq!(host.remaining_responses(), 1);
}

#[tokio::test(start_paused = true)]
async fn malformed_status_response_aborts() {
    let host = app_host()
        .respond(task_json("task-1", "t"))
        .respond("{\"state\": ");

    let err = commands::run_and_wait(
        &host,
        "myapp",
        "echo",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunAndWaitError::JsonError(_)));
    assert_eq!(host.status_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn log_stream_failure_is_an_error() {
    let host = app_host()
        .respond(task_json("task-1", "t"))
        .fail_tail_logs();

    let err = commands::run_and_wait(
        &host,
        "myapp",
        "echo",
        &WaitSettings::default(),
        CaptureSink::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunAndWaitError::HostError { .. }));
    assert!(host.status_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn disabled_relay_skips_log_stream() -> TestResult {
    let host = app_host()
        .respond(task_json("task-1", "t"))
        .respond(status_json("task-1", "SUCCEEDED"))
        .fail_tail_logs();

    let settings = WaitSettings {
        relay_logs: false,
        ..WaitSettings::default()
    };

    commands::run_and_wait(&host, "myapp", "echo", &settings, CaptureSink::new()).await?;

    assert!(host.tail_requests().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn relays_only_this_tasks_output() -> TestResult {
    let host = app_host()
        .respond(task_json("task-1", "migrate"))
        .respond(status_json("task-1", "SUCCEEDED"))
        .with_log(LogEnvelope::new("APP/TASK/migrate", MessageType::Out, "step 1"))
        .with_log(LogEnvelope::new("APP/PROC/WEB", MessageType::Out, "GET /health"))
        .with_log(LogEnvelope::new("APP/TASK/other", MessageType::Out, "not mine"))
        .with_log(LogEnvelope::new("APP/TASK/migrate", MessageType::Err, "warning: slow"))
        .with_log(LogEnvelope::new("CELL", MessageType::Out, "Cell creating container"))
        .with_log(LogEnvelope::new("APP/TASK/migrate", MessageType::Out, "done"))
        .with_log_error("websocket: close 1006");

    let sink = CaptureSink::new();
    commands::run_and_wait(&host, "myapp", "rake migrate", &WaitSettings::default(), sink.clone())
        .await?;

    assert_eq!(sink.stdout_lines(), vec!["step 1", "done"]);
    assert_eq!(sink.stderr_lines(), vec!["warning: slow"]);

    Ok(())
}
