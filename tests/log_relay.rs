// tests/log_relay.rs

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use run_and_wait::engine::spawn_relay;
use run_and_wait::host::{LogEnvelope, LogStream};
use run_and_wait::types::MessageType;
use run_and_wait_test_utils::{CaptureSink, LogCapture};

fn out(source: &str, msg: &str) -> LogEnvelope {
    LogEnvelope::new(source, MessageType::Out, msg)
}

/// Let the relay task run until it has nothing left to do.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn stream_error_does_not_stop_relay() {
    let logs = LogCapture::new();
    let _guard = logs.install();

    let (msg_tx, msg_rx) = mpsc::channel(4);
    let (err_tx, err_rx) = mpsc::channel(4);
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let sink = CaptureSink::new();

    let handle = spawn_relay(LogStream::new(msg_rx, err_rx), "job", sink.clone(), cancel_rx);

    err_tx.send("websocket: close 1006".to_string()).await.unwrap();
    settle().await;
    assert!(logs.contents().contains("error reading logs: websocket: close 1006"));
    assert!(!handle.is_finished());

    msg_tx.send(out("APP/TASK/job", "after the error")).await.unwrap();
    settle().await;
    assert_eq!(sink.stdout_lines(), vec!["after the error"]);

    cancel_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn errors_queued_after_stream_end_are_logged() {
    let logs = LogCapture::new();
    let _guard = logs.install();

    let (msg_tx, msg_rx) = mpsc::channel::<LogEnvelope>(1);
    let (err_tx, err_rx) = mpsc::channel(4);
    let (cancel_tx, cancel_rx) = oneshot::channel();

    err_tx.send("log stream closed".to_string()).await.unwrap();
    err_tx.send("unauthorized".to_string()).await.unwrap();
    drop(msg_tx);

    let handle = spawn_relay(
        LogStream::new(msg_rx, err_rx),
        "job",
        CaptureSink::new(),
        cancel_rx,
    );
    settle().await;

    cancel_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("relay did not stop after cancellation")
        .unwrap();

    let text = logs.contents();
    assert!(text.contains("error reading logs: log stream closed"), "{text}");
    assert!(text.contains("error reading logs: unauthorized"), "{text}");
}

#[tokio::test]
async fn pending_errors_are_logged_on_cancel() {
    let logs = LogCapture::new();
    let _guard = logs.install();

    let (_msg_tx, msg_rx) = mpsc::channel::<LogEnvelope>(1);
    let (err_tx, err_rx) = mpsc::channel(4);
    let (cancel_tx, cancel_rx) = oneshot::channel();

    err_tx.send("lost connection".to_string()).await.unwrap();
    cancel_tx.send(()).unwrap();

    spawn_relay(
        LogStream::new(msg_rx, err_rx),
        "job",
        CaptureSink::new(),
        cancel_rx,
    )
    .await
    .unwrap();

    assert!(logs.contents().contains("error reading logs: lost connection"));
}
