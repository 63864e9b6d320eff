mod cli;
mod commands;
mod config;
mod error;
mod persistence;
mod repl;
mod state_machine;
mod ui;

use anyhow::Result;
use clap::Parser;
use console::Style;

use cli::{Cli, TopCommand};
use config::TaskellConfig;
use persistence::FileStore;
use repl::Repl;

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {err}", Style::new().red().bold().apply_to("error:"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = TaskellConfig::load()?;
    // `--store` beats the config layer, which already folded in the
    // environment override.
    let files = match &cli.store {
        Some(path) => FileStore::new(path),
        None => FileStore::new(&config.store_path),
    };

    match cli.command {
        None | Some(TopCommand::Repl) => Repl::new(files, config.status_preview).run()?,
        Some(TopCommand::Task(command)) => {
            let message = commands::execute(&command, &files)?;
            println!("{message}");
        }
    }
    Ok(())
}
