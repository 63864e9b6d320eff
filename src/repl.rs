//! Interactive prompt loop.
//!
//! Each accepted line is one full load → transition → save cycle; the loop
//! blocks on stdin between cycles. Command errors are printed and the loop
//! continues; only I/O failures on the terminal itself end the session.

use std::io::{self, BufRead, Write};

use console::Style;

use crate::cli::{Command, StatusFilter};
use crate::commands;
use crate::error::TaskellError;
use crate::persistence::FileStore;
use crate::ui;

const HELP: &str = "\
Commands:
  add <content>           (a)  Capture a task in zatsu state
  delta <id> <criteria>   (d)  Set completion criteria (zatsu → ready)
  start [id]              (s)  Start a task (ready/paused → active)
  pause                   (p)  Pause the active task
  resume [id]             (r)  Resume a paused task
  done [final state]           Complete the active task
  drop [id]               (x)  Abandon a task
  note [id] <text>        (n)  Add a timestamped note
  list [filter]           (l)  List tasks (status name or `pending`)
  show <id>                    Show task details
  clear                   (c)  Refresh the dashboard
  help                    (h)  Show this help
  quit                    (q)  Exit

Smart defaults: start picks the first ready task; pause/done/note/drop
work on the active task. Tasks flow: zatsu → ready → active → done.";

/// What a parsed input line asks the loop to do.
#[derive(Debug, PartialEq)]
enum Action {
    Refresh,
    Quit,
    Help,
    Usage(&'static str),
    Unknown(String),
    Run(Command),
}

pub struct Repl {
    files: FileStore,
    preview: usize,
}

impl Repl {
    pub fn new(files: FileStore, preview: usize) -> Self {
        Self { files, preview }
    }

    pub fn run(&self) -> Result<(), TaskellError> {
        println!("taskell — type \"help\" for commands, \"quit\" to exit");
        self.print_dashboard()?;

        let stdin = io::stdin();
        let error_style = Style::new().red().bold();
        loop {
            print!("taskell> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            match parse_line(&line) {
                Action::Refresh => self.print_dashboard()?,
                Action::Quit => break,
                Action::Help => println!("{HELP}"),
                Action::Usage(usage) => println!("{usage}"),
                Action::Unknown(word) => {
                    println!("Unknown command: {word}. Type \"help\" for commands.")
                }
                Action::Run(command) => match commands::execute(&command, &self.files) {
                    Ok(message) => println!("{message}"),
                    Err(err) => println!("{} {err}", error_style.apply_to("error:")),
                },
            }
        }
        Ok(())
    }

    fn print_dashboard(&self) -> Result<(), TaskellError> {
        let store = self.files.load()?;
        println!("{}", ui::format_dashboard(&store, self.preview));
        Ok(())
    }
}

fn parse_line(line: &str) -> Action {
    let mut words = line.split_whitespace().map(String::from);
    let Some(keyword) = words.next() else {
        return Action::Refresh;
    };
    let rest: Vec<String> = words.collect();

    match keyword.to_lowercase().as_str() {
        "quit" | "q" | "exit" => Action::Quit,
        "help" | "h" => Action::Help,
        "clear" | "c" => Action::Refresh,
        "add" | "a" => {
            if rest.is_empty() {
                Action::Usage("Usage: add <content>")
            } else {
                Action::Run(Command::Add { content: rest })
            }
        }
        "delta" | "d" | "criteria" => {
            if rest.len() < 2 {
                Action::Usage("Usage: delta <id> <criteria>")
            } else {
                Action::Run(Command::Delta {
                    id: rest[0].clone(),
                    criteria: rest[1..].to_vec(),
                })
            }
        }
        "start" | "s" => Action::Run(Command::Start {
            id: rest.first().cloned(),
        }),
        "pause" | "p" => Action::Run(Command::Pause),
        "resume" | "r" => Action::Run(Command::Resume {
            id: rest.first().cloned(),
        }),
        "done" => Action::Run(Command::Done { final_state: rest }),
        "drop" | "x" => Action::Run(Command::Drop {
            id: rest.first().cloned(),
        }),
        "note" | "n" => {
            if rest.is_empty() {
                Action::Usage("Usage: note [id] <text>")
            } else {
                Action::Run(Command::Note { args: rest })
            }
        }
        "list" | "l" | "tl" => match rest.first() {
            None => Action::Run(Command::List { filter: None }),
            Some(word) => match parse_filter(word) {
                Some(filter) => Action::Run(Command::List { filter: Some(filter) }),
                None => Action::Usage(
                    "Usage: list [zatsu|ready|active|paused|done|dropped|pending]",
                ),
            },
        },
        "show" => match rest.first() {
            Some(id) => Action::Run(Command::Show { id: id.clone() }),
            None => Action::Usage("Usage: show <id>"),
        },
        other => Action::Unknown(other.to_string()),
    }
}

fn parse_filter(word: &str) -> Option<StatusFilter> {
    match word.to_lowercase().as_str() {
        "zatsu" => Some(StatusFilter::Zatsu),
        "ready" => Some(StatusFilter::Ready),
        "active" => Some(StatusFilter::Active),
        "paused" => Some(StatusFilter::Paused),
        "done" => Some(StatusFilter::Done),
        "dropped" => Some(StatusFilter::Dropped),
        "pending" => Some(StatusFilter::Pending),
        _ => None,
    }
}
