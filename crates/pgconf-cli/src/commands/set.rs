//! The set command

use colored::Colorize;
use pgconf_core::ConfigurationStore;

use crate::error::{CliError, Result};

/// Change a parameter value and persist the document.
///
/// An unknown name leaves the document untouched and is reported as a user
/// error.
pub fn run_set(store: &mut ConfigurationStore, name: &str, value: &str) -> Result<()> {
    let previous = store
        .set_parameter_value(name, value)?
        .ok_or_else(|| CliError::user(format!("Unknown parameter '{}'", name)))?;

    println!(
        "{} {} = {} {}",
        "Updated".green().bold(),
        name,
        value,
        format!("(was {})", previous.value).dimmed()
    );
    Ok(())
}
