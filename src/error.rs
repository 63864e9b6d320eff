use thiserror::Error;

use crate::state_machine::Status;

#[derive(Debug, Error)]
pub enum TaskellError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Identifier \"{identifier}\" matches {count} tasks; use a numeric id")]
    AmbiguousIdentifier { identifier: String, count: usize },

    #[error("Cannot {operation} task {id} in {status} state")]
    IllegalTransition {
        operation: &'static str,
        id: u64,
        status: Status,
    },

    #[error("Task {active_id} is already active. Pause it first.")]
    ActiveTaskExists { active_id: u64 },

    #[error("{0}")]
    Validation(String),

    #[error("Store file is corrupt: {0}")]
    CorruptStore(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
