//! Terminal rendering — status glyphs and styled task output via `console`.

use console::Style;

use crate::state_machine::{Status, Store, Task};

pub fn status_glyph(status: Status) -> &'static str {
    match status {
        Status::Zatsu => "💭",
        Status::Ready => "🎯",
        Status::Active => "⚡",
        Status::Paused => "⏸",
        Status::Done => "✅",
        Status::Dropped => "❌",
    }
}

/// One-line task rendering: `⚡ [3] content (25m)`.
pub fn format_task(task: &Task) -> String {
    let time = if task.time_spent > 0 {
        format!(" ({}m)", task.time_spent)
    } else {
        String::new()
    };
    format!(
        "{} [{}] {}{}",
        status_glyph(task.status),
        task.id,
        task.content,
        time
    )
}

pub fn format_task_list(tasks: &[&Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title}\n  (none)");
    }
    let lines: Vec<String> = tasks.iter().map(|t| format!("  {}", format_task(t))).collect();
    format!("{title}\n{}", lines.join("\n"))
}

/// Full detail view used by `show`: criteria, final state, timestamps, and
/// the complete note log.
pub fn format_task_details(task: &Task) -> String {
    let mut out = format!("{}\n", format_task(task));
    out.push_str(&format!("  Status:  {}\n", task.status));
    out.push_str(&format!(
        "  Created: {}\n",
        task.created_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!(
        "  Updated: {}\n",
        task.updated_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(delta) = &task.delta {
        out.push_str(&format!("  Goal:    {delta}\n"));
    }
    if let Some(final_state) = &task.final_state {
        out.push_str(&format!("  Final:   {final_state}\n"));
    }
    if task.time_spent > 0 {
        out.push_str(&format!("  Time:    {} minutes\n", task.time_spent));
    }
    if !task.notes.is_empty() {
        out.push_str(&format!("  Notes ({}):\n", task.notes.len()));
        for note in &task.notes {
            out.push_str(&format!(
                "    {} {}\n",
                note.timestamp.format("%Y-%m-%d %H:%M"),
                note.content
            ));
        }
    }
    out.trim_end().to_string()
}

/// The REPL dashboard: the active task (if any), per-status counts, and a
/// short preview of zatsu/ready/paused sections.
pub fn format_dashboard(store: &Store, preview: usize) -> String {
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    let counts = store.status_counts();
    let mut out = String::new();

    if let Some(active) = store.active_task() {
        out.push_str(&format!("{} {}\n", bold.apply_to("ACTIVE:"), format_task(active)));
        if let Some(delta) = &active.delta {
            out.push_str(&format!("  Goal: {delta}\n"));
        }
    }

    out.push_str(&format!(
        "{} {} pending | {} active | {} done | {} dropped\n",
        bold.apply_to("Tasks:"),
        counts.pending(),
        counts.active,
        counts.done,
        counts.dropped
    ));

    for (label, tasks) in [
        ("Zatsu — need criteria:", store.by_status(Status::Zatsu)),
        ("Ready — available to start:", store.ready_tasks()),
        ("Paused:", store.paused_tasks()),
    ] {
        if tasks.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", dim.apply_to(label)));
        for task in tasks.iter().take(preview) {
            out.push_str(&format!("  {}\n", format_task(task)));
        }
        if tasks.len() > preview {
            out.push_str(&format!("  … and {} more\n", tasks.len() - preview));
        }
    }

    out.trim_end().to_string()
}
