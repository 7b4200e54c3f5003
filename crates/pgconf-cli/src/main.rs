//! pgconf - PostgreSQL configuration store CLI
//!
//! Inspect and edit a data directory's `postgresql.json`, and render it as
//! `postgresql.conf` text.

mod cli;
mod commands;
mod context;
mod error;

use std::io;
use std::path::Path;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Some(command) => execute_command(cli.pgdata.as_deref(), cli.config.as_deref(), command),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(io::stderr)
        .init();
}

fn execute_command(pgdata: Option<&Path>, config: Option<&Path>, command: Commands) -> Result<()> {
    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "pgconf", &mut io::stdout());
        return Ok(());
    }

    let mut store = context::open_store(pgdata, config)?;

    match command {
        Commands::Pgdata => commands::run_pgdata(&store),
        Commands::Get { name, json } => commands::run_get(&store, &name, json),
        Commands::List { json } => commands::run_list(&store, json),
        Commands::Categories { json } => commands::run_categories(&store, json),
        Commands::Category { name, json } => commands::run_category(&store, &name, json),
        Commands::Set { name, value } => commands::run_set(&mut store, &name, &value),
        Commands::Export { output, write } => {
            let target = if write { Some(store.conf_path().to_native()) } else { output };
            commands::run_export(&store, target.as_deref())
        }
        Commands::Persist => commands::run_persist(&store),
        Commands::Completions { .. } => Ok(()),
    }
}
