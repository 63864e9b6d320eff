//! Command execution shared by the one-shot CLI and the REPL.
//!
//! Each operation is a single load → transition → save cycle against the
//! file store; the engine itself never touches disk. Smart defaults live
//! here: `start` picks the first ready task, `resume` the first paused one,
//! and `pause`/`done`/`note`/`drop` fall back to the active task.

use chrono::Utc;

use crate::cli::{Command, StatusFilter};
use crate::error::TaskellError;
use crate::persistence::FileStore;
use crate::state_machine::{Engine, Status, Store};
use crate::ui;

pub fn execute(command: &Command, files: &FileStore) -> Result<String, TaskellError> {
    match command {
        Command::Add { content } => add(files, &content.join(" ")),
        Command::Delta { id, criteria } => set_criteria(files, id, &criteria.join(" ")),
        Command::Start { id } => start(files, id.as_deref()),
        Command::Pause => pause(files),
        Command::Resume { id } => resume(files, id.as_deref()),
        Command::Done { final_state } => done(files, &final_state.join(" ")),
        Command::Drop { id } => drop_task(files, id.as_deref()),
        Command::Note { args } => note(files, args),
        Command::List { filter } => list(files, *filter),
        Command::Show { id } => show(files, id),
    }
}

fn add(files: &FileStore, content: &str) -> Result<String, TaskellError> {
    let store = files.load()?;
    let (next, id) = Engine::add(&store, content, Utc::now())?;
    files.save(&next)?;
    Ok(format!("Added task {id}: {} (zatsu)", content.trim()))
}

fn set_criteria(files: &FileStore, identifier: &str, criteria: &str) -> Result<String, TaskellError> {
    let store = files.load()?;
    let id = store.resolve(identifier)?.id;
    let next = Engine::set_criteria(&store, id, criteria, Utc::now())?;
    files.save(&next)?;
    Ok(format!("Task {id} is now ready: \"{}\"", criteria.trim()))
}

fn start(files: &FileStore, identifier: Option<&str>) -> Result<String, TaskellError> {
    let store = files.load()?;
    let (id, content) = match identifier {
        Some(ident) => {
            let task = store.resolve(ident)?;
            (task.id, task.content.clone())
        }
        None => {
            let ready = store.ready_tasks();
            let first = ready.first().ok_or_else(|| {
                TaskellError::Validation("No ready tasks to start".into())
            })?;
            (first.id, first.content.clone())
        }
    };
    let next = Engine::start(&store, id, Utc::now())?;
    files.save(&next)?;
    Ok(format!("Started task {id}: {content}"))
}

fn pause(files: &FileStore) -> Result<String, TaskellError> {
    let store = files.load()?;
    let id = store
        .active_task()
        .map(|t| t.id)
        .ok_or_else(|| TaskellError::Validation("No active task to pause".into()))?;
    let next = Engine::pause(&store, id, Utc::now())?;
    files.save(&next)?;
    let spent = next.find(id).map(|t| t.time_spent).unwrap_or_default();
    Ok(format!("Paused task {id} ({spent}m logged)"))
}

fn resume(files: &FileStore, identifier: Option<&str>) -> Result<String, TaskellError> {
    let store = files.load()?;
    let (id, status, content) = match identifier {
        Some(ident) => {
            let task = store.resolve(ident)?;
            (task.id, task.status, task.content.clone())
        }
        None => {
            let paused = store.paused_tasks();
            let first = paused.first().ok_or_else(|| {
                TaskellError::Validation("No paused tasks to resume".into())
            })?;
            (first.id, first.status, first.content.clone())
        }
    };
    // `resume` is stricter than `start`: only paused tasks qualify.
    if status != Status::Paused {
        return Err(TaskellError::IllegalTransition {
            operation: "resume",
            id,
            status,
        });
    }
    let next = Engine::start(&store, id, Utc::now())?;
    files.save(&next)?;
    Ok(format!("Resumed task {id}: {content}"))
}

fn done(files: &FileStore, final_state: &str) -> Result<String, TaskellError> {
    let store = files.load()?;
    let id = store
        .active_task()
        .map(|t| t.id)
        .ok_or_else(|| TaskellError::Validation("No active task to complete".into()))?;
    let final_state = final_state.trim();
    let final_state = (!final_state.is_empty()).then_some(final_state);
    let next = Engine::complete(&store, id, final_state, Utc::now())?;
    files.save(&next)?;

    let spent = next.find(id).map(|t| t.time_spent).unwrap_or_default();
    let suffix = final_state
        .map(|s| format!(" → {s}"))
        .unwrap_or_default();
    Ok(format!("Completed task {id}{suffix} ({spent}m total)"))
}

fn drop_task(files: &FileStore, identifier: Option<&str>) -> Result<String, TaskellError> {
    let store = files.load()?;
    let id = match identifier {
        Some(ident) => store.resolve(ident)?.id,
        None => store
            .active_task()
            .map(|t| t.id)
            .ok_or_else(|| TaskellError::Validation("No active task to drop".into()))?,
    };
    let next = Engine::drop_task(&store, id, Utc::now())?;
    files.save(&next)?;
    Ok(format!("Dropped task {id}"))
}

fn note(files: &FileStore, args: &[String]) -> Result<String, TaskellError> {
    let store = files.load()?;
    // `note <id> <text>` when the first word is numeric, otherwise
    // everything is the note text for the active task. A numeric first word
    // always targets that id; a typo surfaces as not-found rather than
    // landing the text on the active task.
    let (id, content) = match args.first().and_then(|a| a.parse::<u64>().ok()) {
        Some(id) if args.len() > 1 => (id, args[1..].join(" ")),
        _ => {
            let active = store.active_task().ok_or_else(|| {
                TaskellError::Validation(
                    "No active task — use `note <id> <text>`".into(),
                )
            })?;
            (active.id, args.join(" "))
        }
    };
    let next = Engine::add_note(&store, id, &content, Utc::now())?;
    files.save(&next)?;
    Ok(format!("Added note to task {id}"))
}

fn list(files: &FileStore, filter: Option<StatusFilter>) -> Result<String, TaskellError> {
    let store = files.load()?;
    let (tasks, title) = select(&store, filter);
    Ok(ui::format_task_list(&tasks, title))
}

fn select(store: &Store, filter: Option<StatusFilter>) -> (Vec<&crate::state_machine::Task>, &'static str) {
    match filter {
        None => (store.pending_tasks(), "Tasks:"),
        Some(StatusFilter::Pending) => (store.pending_tasks(), "Pending tasks:"),
        Some(StatusFilter::Zatsu) => (store.by_status(Status::Zatsu), "Zatsu tasks:"),
        Some(StatusFilter::Ready) => (store.ready_tasks(), "Ready tasks:"),
        Some(StatusFilter::Active) => (store.by_status(Status::Active), "Active task:"),
        Some(StatusFilter::Paused) => (store.paused_tasks(), "Paused tasks:"),
        Some(StatusFilter::Done) => (store.completed_tasks(), "Completed tasks:"),
        Some(StatusFilter::Dropped) => (store.by_status(Status::Dropped), "Dropped tasks:"),
    }
}

fn show(files: &FileStore, identifier: &str) -> Result<String, TaskellError> {
    let store = files.load()?;
    let task = store.resolve(identifier)?;
    Ok(ui::format_task_details(task))
}
