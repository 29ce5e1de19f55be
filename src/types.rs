use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Lifecycle state of a platform task as reported by `GET /v3/tasks/:guid`.
///
/// Only `SUCCEEDED` and `FAILED` are terminal; every other value
/// (`PENDING`, `RUNNING`, `CANCELING`, ...) is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Succeeded,
    Failed,
    InFlight(String),
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

impl From<&str> for TaskState {
    fn from(s: &str) -> Self {
        match s {
            "SUCCEEDED" => TaskState::Succeeded,
            "FAILED" => TaskState::Failed,
            other => TaskState::InFlight(other.to_string()),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Succeeded => f.write_str("SUCCEEDED"),
            TaskState::Failed => f.write_str("FAILED"),
            TaskState::InFlight(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for TaskState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `null` is treated like an absent state: still in flight.
        let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(TaskState::from(s.as_str()))
    }
}

/// Which stream a relayed log message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Out,
    Err,
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, <Self as FromStr>::Err> {
        match s.trim() {
            "OUT" => Ok(MessageType::Out),
            "ERR" => Ok(MessageType::Err),
            other => Err(format!("unknown log message type: {other}")),
        }
    }
}

/// Parse an interval such as `"250ms"`, `"30s"`, `"2m"` or `"1h"`.
///
/// The number must be a whole count; values whose total does not fit in
/// `u64` seconds (or milliseconds, for `ms`) are rejected.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("duration '{s}' has no unit (ms, s, m, h)"))?;
    let (digits, unit) = s.split_at(split);

    let count: u64 = digits
        .parse()
        .map_err(|e| format!("invalid duration number '{digits}': {e}"))?;

    let secs_per_unit = match unit.trim().to_lowercase().as_str() {
        "ms" => return Ok(Duration::from_millis(count)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        other => {
            return Err(format!(
                "unsupported duration unit '{other}'; expected ms, s, m, or h"
            ));
        }
    };

    count
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{s}' too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_state_from_wire() {
        assert_eq!(TaskState::from("SUCCEEDED"), TaskState::Succeeded);
        assert_eq!(TaskState::from("FAILED"), TaskState::Failed);
        assert_eq!(
            TaskState::from("RUNNING"),
            TaskState::InFlight("RUNNING".to_string())
        );
        assert!(!TaskState::from("").is_terminal());
    }

    #[test]
    fn task_state_is_case_sensitive() {
        assert!(!TaskState::from("succeeded").is_terminal());
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration(" 30s ").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert!(parse_duration("30").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("5 days").is_err());
    }

    #[test]
    fn oversized_durations_are_rejected() {
        let err = parse_duration("307445734561825861m").unwrap_err();
        assert!(err.contains("too large"), "{err}");
        assert!(parse_duration("5124095576030432h").is_err());
        assert!(parse_duration("18446744073709551615s").is_ok());
        assert!(parse_duration("18446744073709551616s").is_err());
    }

    #[test]
    fn null_state_decodes_as_in_flight() {
        let st: TaskState = serde_json::from_str("null").unwrap();
        assert_eq!(st, TaskState::InFlight(String::new()));
        assert!(!st.is_terminal());
    }
}
