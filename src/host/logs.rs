// src/host/logs.rs

//! Parsing of lines printed by `cf logs APPNAME`.
//!
//! A streamed line looks like:
//!
//! ```text
//!    2024-05-02T10:15:01.12+0000 [APP/TASK/migrate/0] OUT Migrating users...
//! ```
//!
//! Header lines (`Retrieving logs for app ...`) and continuation lines of
//! multi-line messages do not match and are skipped.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::MessageType;

static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S+)\s+\[([^\]]+)\]\s+(OUT|ERR)(?: (.*))?$").expect("static regex")
});

/// A single log message attributed to a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEnvelope {
    /// Source type without the instance index, e.g. `APP/TASK/migrate`.
    pub source_type: String,
    pub message_type: MessageType,
    pub message: String,
}

impl LogEnvelope {
    pub fn new(
        source_type: impl Into<String>,
        message_type: MessageType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            message_type,
            message: message.into(),
        }
    }
}

/// Parse one streamed log line, returning `None` for lines that are not log
/// messages.
pub fn parse_log_line(line: &str) -> Option<LogEnvelope> {
    let caps = LOG_LINE.captures(line)?;

    let source = caps.get(2)?.as_str();
    let message_type = caps.get(3)?.as_str().parse::<MessageType>().ok()?;
    let message = caps.get(4).map(|m| m.as_str()).unwrap_or_default();

    Some(LogEnvelope {
        source_type: strip_instance(source).to_string(),
        message_type,
        message: message.to_string(),
    })
}

/// `APP/TASK/migrate/0` -> `APP/TASK/migrate`; sources without a numeric
/// instance suffix are returned unchanged.
fn strip_instance(source: &str) -> &str {
    match source.rsplit_once('/') {
        Some((head, idx)) if !idx.is_empty() && idx.chars().all(|c| c.is_ascii_digit()) => head,
        _ => source,
    }
}
