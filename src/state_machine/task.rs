use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The six states of the task lifecycle.
///
/// Tasks flow: zatsu → ready → active → done, with `active` ⇄ `paused`
/// and `dropped` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Quick capture, no completion criteria yet.
    Zatsu,
    /// Completion criteria set, ready to work on.
    Ready,
    /// Currently being worked on.
    Active,
    /// Temporarily paused.
    Paused,
    /// Completed (terminal).
    Done,
    /// Abandoned (terminal).
    Dropped,
}

impl Status {
    /// Terminal states admit no further transitions except the idempotent
    /// re-drop of a dropped task.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Done | Status::Dropped)
    }

    /// Pending covers everything still on the board.
    pub fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Zatsu => write!(f, "zatsu"),
            Status::Ready => write!(f, "ready"),
            Status::Active => write!(f, "active"),
            Status::Paused => write!(f, "paused"),
            Status::Done => write!(f, "done"),
            Status::Dropped => write!(f, "dropped"),
        }
    }
}

/// A timestamped note appended to a task's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// A single tracked task.
///
/// `session_start` is set if and only if `status == Active`. `time_spent`
/// only ever grows, by the rounded length of a just-ended active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub content: String,
    pub status: Status,
    /// Completion criterion — what done looks like. Required before the
    /// task may leave `zatsu`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    /// Description of the final state, recorded at completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_start: Option<DateTime<Utc>>,
    /// Whole minutes spent across all finished active sessions.
    pub time_spent: u64,
    pub notes: Vec<Note>,
}

impl Task {
    pub fn new(id: u64, content: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            status: Status::Zatsu,
            delta: None,
            final_state: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
            session_start: None,
            time_spent: 0,
            notes: Vec::new(),
        }
    }
}

/// Elapsed session length in whole minutes, rounded to nearest.
pub fn elapsed_minutes(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let ms = (now - start).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms as f64 / 60_000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_task_defaults() {
        let now = Utc::now();
        let task = Task::new(1, "Write spec".into(), now);
        assert_eq!(task.status, Status::Zatsu);
        assert_eq!(task.time_spent, 0);
        assert!(task.notes.is_empty());
        assert!(task.delta.is_none());
        assert!(task.session_start.is_none());
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
    }

    #[test]
    fn status_terminal_classification() {
        assert!(Status::Done.is_terminal());
        assert!(Status::Dropped.is_terminal());
        assert!(Status::Zatsu.is_pending());
        assert!(Status::Ready.is_pending());
        assert!(Status::Active.is_pending());
        assert!(Status::Paused.is_pending());
    }

    #[test]
    fn status_display_lowercase() {
        assert_eq!(Status::Zatsu.to_string(), "zatsu");
        assert_eq!(Status::Dropped.to_string(), "dropped");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "\"active\"");
        let parsed: Status = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(parsed, Status::Paused);
    }

    #[test]
    fn elapsed_rounds_to_nearest_minute() {
        let start = Utc::now();
        assert_eq!(elapsed_minutes(start, start + Duration::seconds(29)), 0);
        assert_eq!(elapsed_minutes(start, start + Duration::seconds(31)), 1);
        assert_eq!(elapsed_minutes(start, start + Duration::minutes(25)), 25);
        assert_eq!(
            elapsed_minutes(start, start + Duration::seconds(150)),
            3 // 2.5 minutes rounds up
        );
    }

    #[test]
    fn elapsed_never_negative() {
        let start = Utc::now();
        assert_eq!(elapsed_minutes(start, start - Duration::minutes(5)), 0);
    }

    #[test]
    fn task_serialization_roundtrip() {
        let now = Utc::now();
        let mut task = Task::new(7, "Fix the parser".into(), now);
        task.delta = Some("All tests pass".into());
        task.notes.push(Note {
            timestamp: now,
            content: "Found the bug".into(),
        });

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn task_uses_camel_case_fields() {
        let task = Task::new(1, "x".into(), Utc::now());
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
        assert!(json.contains("timeSpent"));
        // Absent optionals are omitted entirely.
        assert!(!json.contains("sessionStart"));
        assert!(!json.contains("finalState"));
    }
}
