//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// pgconf - Inspect and edit a PostgreSQL configuration kept as JSON
#[derive(Parser, Debug)]
#[command(name = "pgconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// PostgreSQL data directory holding postgresql.json
    #[arg(short = 'D', long, env = "PGDATA", global = true)]
    pub pgdata: Option<PathBuf>,

    /// Settings file (defaults to the per-user config.toml when present)
    #[arg(short, long, env = "PGCONF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the absolute path of the data directory
    Pgdata,

    /// Show a single parameter
    Get {
        /// Parameter name, e.g. shared_buffers
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List all parameter names (sorted)
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List all categories in document order
    Categories {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the parameters of one category (sorted)
    Category {
        /// Category name, e.g. "Resource Usage"
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Change a parameter value and persist postgresql.json
    ///
    /// Examples:
    ///   pgconf set shared_buffers 256MB
    ///   pgconf set log_line_prefix ''
    Set {
        /// Parameter name
        name: String,

        /// New value (stored verbatim)
        value: String,
    },

    /// Render the configuration as postgresql.conf text
    Export {
        /// Write atomically to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write postgresql.conf into the data directory
        #[arg(short, long, conflicts_with = "output")]
        write: bool,
    },

    /// Rewrite postgresql.json from the loaded configuration
    Persist,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
