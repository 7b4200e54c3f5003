//! Export and persist commands

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use pgconf_core::ConfigurationStore;
use pgconf_fs::NormalizedPath;

use crate::error::Result;

/// Print the `postgresql.conf` rendering, or write it atomically to `output`.
pub fn run_export(store: &ConfigurationStore, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let path = NormalizedPath::new(path);
            store.write_key_value_file(&path)?;
            eprintln!("{} {}", "Wrote".green().bold(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(store.export_key_value().as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Rewrite `postgresql.json` from the loaded configuration.
pub fn run_persist(store: &ConfigurationStore) -> Result<()> {
    store.persist()?;
    println!("{} {}", "Persisted".green().bold(), store.document_path());
    Ok(())
}
