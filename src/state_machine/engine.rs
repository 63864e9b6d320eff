use chrono::{DateTime, Utc};

use crate::error::TaskellError;

use super::store::Store;
use super::task::{Note, Status, Task, elapsed_minutes};

/// The pure transition engine.
///
/// Every operation takes the current store plus the current instant and
/// returns a fresh store; the input is never mutated, so a failed call
/// leaves nothing half-updated. Callers pass `Utc::now()`; tests pass
/// simulated instants to make time accounting deterministic.
pub struct Engine;

impl Engine {
    /// Captures a new task in `zatsu` state. Returns the new store and the
    /// assigned id.
    pub fn add(
        store: &Store,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<(Store, u64), TaskellError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(TaskellError::Validation("Task content required".into()));
        }

        let mut next = store.clone();
        let id = next.next_id;
        next.tasks.push(Task::new(id, content.to_string(), now));
        next.next_id += 1;
        Ok((next, id))
    }

    /// Sets the completion criterion, moving `zatsu` → `ready`.
    pub fn set_criteria(
        store: &Store,
        id: u64,
        criteria: &str,
        now: DateTime<Utc>,
    ) -> Result<Store, TaskellError> {
        let criteria = criteria.trim();
        if criteria.is_empty() {
            return Err(TaskellError::Validation(
                "Completion criteria required".into(),
            ));
        }

        let mut next = store.clone();
        let task = find_mut(&mut next, id)?;
        if task.status != Status::Zatsu {
            return Err(illegal("set criteria for", task));
        }
        task.delta = Some(criteria.to_string());
        task.status = Status::Ready;
        task.updated_at = now;
        Ok(next)
    }

    /// Starts (or resumes) work: `ready`/`paused` → `active`.
    ///
    /// Fails while any other task holds the active slot.
    pub fn start(store: &Store, id: u64, now: DateTime<Utc>) -> Result<Store, TaskellError> {
        if let Some(active_id) = store.active_task_id {
            return Err(TaskellError::ActiveTaskExists { active_id });
        }

        let mut next = store.clone();
        let task = find_mut(&mut next, id)?;
        if !matches!(task.status, Status::Ready | Status::Paused) {
            return Err(illegal("start", task));
        }
        task.status = Status::Active;
        task.session_start = Some(now);
        task.updated_at = now;
        next.active_task_id = Some(id);
        Ok(next)
    }

    /// Pauses the active session, banking its elapsed minutes.
    pub fn pause(store: &Store, id: u64, now: DateTime<Utc>) -> Result<Store, TaskellError> {
        let mut next = store.clone();
        let task = find_mut(&mut next, id)?;
        if task.status != Status::Active {
            return Err(illegal("pause", task));
        }
        end_session(task, now);
        task.status = Status::Paused;
        task.updated_at = now;
        next.active_task_id = None;
        Ok(next)
    }

    /// Completes the active task: banks elapsed minutes, records the final
    /// state if given, and stamps `completed_at`.
    pub fn complete(
        store: &Store,
        id: u64,
        final_state: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Store, TaskellError> {
        let mut next = store.clone();
        let task = find_mut(&mut next, id)?;
        if task.status != Status::Active {
            return Err(illegal("complete", task));
        }
        end_session(task, now);
        task.status = Status::Done;
        task.final_state = final_state
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        task.completed_at = Some(now);
        task.updated_at = now;
        next.active_task_id = None;
        Ok(next)
    }

    /// Abandons a task from any non-`done` state.
    ///
    /// Dropping an already-dropped task is a defined no-effect success: the
    /// store is returned unchanged.
    pub fn drop_task(store: &Store, id: u64, now: DateTime<Utc>) -> Result<Store, TaskellError> {
        let mut next = store.clone();
        let was_active = next.active_task_id == Some(id);
        let task = find_mut(&mut next, id)?;
        match task.status {
            Status::Done => return Err(illegal("drop", task)),
            Status::Dropped => return Ok(store.clone()),
            _ => {}
        }
        if task.status == Status::Active {
            end_session(task, now);
        }
        task.status = Status::Dropped;
        task.updated_at = now;
        if was_active {
            next.active_task_id = None;
        }
        Ok(next)
    }

    /// Appends a timestamped note. Allowed in any state.
    pub fn add_note(
        store: &Store,
        id: u64,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Store, TaskellError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(TaskellError::Validation("Note content required".into()));
        }

        let mut next = store.clone();
        let task = find_mut(&mut next, id)?;
        task.notes.push(Note {
            timestamp: now,
            content: content.to_string(),
        });
        task.updated_at = now;
        Ok(next)
    }
}

fn find_mut(store: &mut Store, id: u64) -> Result<&mut Task, TaskellError> {
    store
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| TaskellError::TaskNotFound(id.to_string()))
}

fn illegal(operation: &'static str, task: &Task) -> TaskellError {
    TaskellError::IllegalTransition {
        operation,
        id: task.id,
        status: task.status,
    }
}

/// Closes the running session: folds its rounded length into `time_spent`
/// and clears `session_start`.
fn end_session(task: &mut Task, now: DateTime<Utc>) {
    if let Some(start) = task.session_start.take() {
        task.time_spent += elapsed_minutes(start, now);
    }
}
