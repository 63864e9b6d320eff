//! Command-line interface, built on clap.
//!
//! Defines [`Cli`] with one subcommand per task operation plus `repl`.
//! Running with no subcommand also enters the REPL.

use clap::{Parser, Subcommand, ValueEnum};

/// taskell — task tracking as an explicit state machine.
#[derive(Debug, Parser)]
#[command(name = "taskell", version, about)]
pub struct Cli {
    /// No subcommand drops into the interactive REPL.
    #[command(subcommand)]
    pub command: Option<TopCommand>,

    /// Store file to use instead of the configured one.
    #[arg(long, global = true)]
    pub store: Option<String>,
}

/// Top-level dispatch: either the REPL or a one-shot task command.
///
/// Kept separate from [`Command`] so the executor only ever sees task
/// operations; the REPL is routed in `main`.
#[derive(Debug, PartialEq, Subcommand)]
pub enum TopCommand {
    /// Enter the interactive REPL.
    Repl,

    #[command(flatten)]
    Task(Command),
}

/// Status filter accepted by `list`; `pending` covers every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Zatsu,
    Ready,
    Active,
    Paused,
    Done,
    Dropped,
    Pending,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Capture a new task (zatsu state, no criteria yet).
    #[command(visible_alias = "a")]
    Add {
        /// Task content.
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },

    /// Set completion criteria (zatsu → ready).
    #[command(visible_alias = "d", alias = "criteria")]
    Delta {
        /// Task id or content substring.
        id: String,
        /// What done looks like.
        #[arg(required = true, num_args = 1..)]
        criteria: Vec<String>,
    },

    /// Start working on a task (ready/paused → active).
    #[command(visible_alias = "s")]
    Start {
        /// Task id; defaults to the first ready task.
        id: Option<String>,
    },

    /// Pause the active task.
    #[command(visible_alias = "p")]
    Pause,

    /// Resume a paused task.
    #[command(visible_alias = "r")]
    Resume {
        /// Task id; defaults to the first paused task.
        id: Option<String>,
    },

    /// Complete the active task.
    Done {
        /// Optional description of the final state.
        #[arg(num_args = 0..)]
        final_state: Vec<String>,
    },

    /// Abandon a task.
    #[command(visible_alias = "x")]
    Drop {
        /// Task id; defaults to the active task.
        id: Option<String>,
    },

    /// Add a timestamped note (to the active task, or `note <id> <text>`).
    #[command(visible_alias = "n")]
    Note {
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
    },

    /// List tasks, most recently updated first.
    #[command(visible_alias = "l")]
    List {
        /// Restrict to one status, or `pending`.
        filter: Option<StatusFilter>,
    },

    /// Show full task details including the note log.
    Show {
        /// Task id or content substring.
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Option<TopCommand> {
        Cli::parse_from(args.iter().copied()).command
    }

    #[test]
    fn cli_parses_add_with_multiword_content() {
        match parse(&["taskell", "add", "write", "the", "report"]) {
            Some(TopCommand::Task(Command::Add { content })) => {
                assert_eq!(content.join(" "), "write the report");
            }
            _ => panic!("expected Add command"),
        }
    }

    #[test]
    fn cli_parses_delta_with_id_and_criteria() {
        match parse(&["taskell", "delta", "3", "report", "approved"]) {
            Some(TopCommand::Task(Command::Delta { id, criteria })) => {
                assert_eq!(id, "3");
                assert_eq!(criteria.join(" "), "report approved");
            }
            _ => panic!("expected Delta command"),
        }
    }

    #[test]
    fn cli_parses_criteria_alias() {
        assert!(matches!(
            parse(&["taskell", "criteria", "3", "done"]),
            Some(TopCommand::Task(Command::Delta { .. }))
        ));
    }

    #[test]
    fn cli_parses_start_without_id() {
        match parse(&["taskell", "start"]) {
            Some(TopCommand::Task(Command::Start { id })) => assert!(id.is_none()),
            _ => panic!("expected Start command"),
        }
    }

    #[test]
    fn cli_parses_done_with_final_state() {
        match parse(&["taskell", "done", "shipped", "to", "prod"]) {
            Some(TopCommand::Task(Command::Done { final_state })) => {
                assert_eq!(final_state.join(" "), "shipped to prod");
            }
            _ => panic!("expected Done command"),
        }
    }

    #[test]
    fn cli_parses_list_filter() {
        match parse(&["taskell", "list", "pending"]) {
            Some(TopCommand::Task(Command::List { filter })) => {
                assert_eq!(filter, Some(StatusFilter::Pending));
            }
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn cli_parses_global_store_flag() {
        let cli = Cli::parse_from(["taskell", "--store", "/tmp/t.json", "list"]);
        assert_eq!(cli.store.as_deref(), Some("/tmp/t.json"));
    }

    #[test]
    fn cli_no_subcommand_means_repl() {
        assert!(parse(&["taskell"]).is_none());
    }

    #[test]
    fn cli_parses_repl_subcommand() {
        assert_eq!(parse(&["taskell", "repl"]), Some(TopCommand::Repl));
    }

    #[test]
    fn cli_short_aliases() {
        assert!(matches!(
            parse(&["taskell", "a", "x"]),
            Some(TopCommand::Task(Command::Add { .. }))
        ));
        assert!(matches!(
            parse(&["taskell", "s"]),
            Some(TopCommand::Task(Command::Start { .. }))
        ));
        assert!(matches!(
            parse(&["taskell", "x", "1"]),
            Some(TopCommand::Task(Command::Drop { .. }))
        ));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
