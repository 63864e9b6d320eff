use serde::{Deserialize, Serialize};

use crate::error::TaskellError;

use super::task::{Status, Task};

/// In-memory snapshot of every task plus the id counter and the
/// currently-active slot.
///
/// `active_task_id` is the single source of truth for "what's active"; every
/// transition keeps it consistent rather than re-deriving it by scanning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub tasks: Vec<Task>,
    /// Strictly greater than any id ever assigned.
    pub next_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_task_id: Option<u64>,
}

/// Per-status task tally for the REPL dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub zatsu: usize,
    pub ready: usize,
    pub active: usize,
    pub paused: usize,
    pub done: usize,
    pub dropped: usize,
}

impl StatusCounts {
    pub fn pending(&self) -> usize {
        self.zatsu + self.ready + self.active + self.paused
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::empty()
    }
}

impl Store {
    pub fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            active_task_id: None,
        }
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The task currently holding the active slot, if any.
    pub fn active_task(&self) -> Option<&Task> {
        self.active_task_id.and_then(|id| self.find(id))
    }

    /// Ready tasks, most recently touched first. Ordering is shared with
    /// [`Store::list`] so the `start` smart default is predictable.
    pub fn ready_tasks(&self) -> Vec<&Task> {
        self.by_status(Status::Ready)
    }

    pub fn paused_tasks(&self) -> Vec<&Task> {
        self.by_status(Status::Paused)
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.by_status(Status::Done)
    }

    /// Everything still on the board: zatsu, ready, active, paused.
    pub fn pending_tasks(&self) -> Vec<&Task> {
        sorted_desc(self.tasks.iter().filter(|t| t.status.is_pending()))
    }

    pub fn by_status(&self, status: Status) -> Vec<&Task> {
        sorted_desc(self.tasks.iter().filter(move |t| t.status == status))
    }

    /// All tasks, most recently updated first.
    pub fn list(&self) -> Vec<&Task> {
        sorted_desc(self.tasks.iter())
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for task in &self.tasks {
            match task.status {
                Status::Zatsu => counts.zatsu += 1,
                Status::Ready => counts.ready += 1,
                Status::Active => counts.active += 1,
                Status::Paused => counts.paused += 1,
                Status::Done => counts.done += 1,
                Status::Dropped => counts.dropped += 1,
            }
        }
        counts
    }

    /// Resolves a numeric id or a case-insensitive substring of task content.
    ///
    /// A substring matching more than one task is an error rather than a
    /// silent first-match pick.
    pub fn resolve(&self, identifier: &str) -> Result<&Task, TaskellError> {
        if let Ok(id) = identifier.parse::<u64>() {
            return self
                .find(id)
                .ok_or_else(|| TaskellError::TaskNotFound(identifier.to_string()));
        }

        let needle = identifier.to_lowercase();
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.content.to_lowercase().contains(&needle))
            .collect();

        match matches.len() {
            0 => Err(TaskellError::TaskNotFound(identifier.to_string())),
            1 => Ok(matches[0]),
            n => Err(TaskellError::AmbiguousIdentifier {
                identifier: identifier.to_string(),
                count: n,
            }),
        }
    }

    /// Verifies the structural invariants of the store.
    ///
    /// - `session_start` is present iff the task is active
    /// - at most one task is active
    /// - `active_task_id` points at exactly that task, or is absent
    /// - `next_id` exceeds every assigned id
    pub fn check_invariants(&self) -> Result<(), TaskellError> {
        let mut active_ids = Vec::new();
        for task in &self.tasks {
            let is_active = task.status == Status::Active;
            if task.session_start.is_some() != is_active {
                return Err(TaskellError::Validation(format!(
                    "task {}: session_start out of sync with {} status",
                    task.id, task.status
                )));
            }
            if is_active {
                active_ids.push(task.id);
            }
            if task.id >= self.next_id {
                return Err(TaskellError::Validation(format!(
                    "task {} id not below next_id {}",
                    task.id, self.next_id
                )));
            }
        }

        if active_ids.len() > 1 {
            return Err(TaskellError::Validation(format!(
                "{} tasks active at once",
                active_ids.len()
            )));
        }
        if self.active_task_id != active_ids.first().copied() {
            return Err(TaskellError::Validation(format!(
                "active_task_id {:?} does not match active task {:?}",
                self.active_task_id,
                active_ids.first()
            )));
        }
        Ok(())
    }
}

fn sorted_desc<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<&'a Task> {
    let mut out: Vec<&Task> = tasks.collect();
    out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    out
}
