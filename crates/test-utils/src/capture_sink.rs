use std::sync::{Arc, Mutex};

use run_and_wait::engine::LogSink;

/// A `LogSink` that records relayed messages instead of printing them.
///
/// Clones share the same buffers, so keep one clone to inspect after
/// handing the other to the code under test.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    out: Arc<Mutex<Vec<String>>>,
    err: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout_lines(&self) -> Vec<String> {
        self.out.lock().unwrap().clone()
    }

    pub fn stderr_lines(&self) -> Vec<String> {
        self.err.lock().unwrap().clone()
    }
}

impl LogSink for CaptureSink {
    fn write_out(&mut self, message: &str) {
        self.out.lock().unwrap().push(message.to_string());
    }

    fn write_err(&mut self, message: &str) {
        self.err.lock().unwrap().push(message.to_string());
    }
}
