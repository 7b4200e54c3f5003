//! Read-only commands

use colored::Colorize;
use pgconf_core::ConfigurationStore;
use serde_json::json;

use crate::error::{CliError, Result};

/// Print the absolute data directory path.
pub fn run_pgdata(store: &ConfigurationStore) -> Result<()> {
    println!("{}", store.data_dir());
    Ok(())
}

/// Print one parameter.
pub fn run_get(store: &ConfigurationStore, name: &str, json: bool) -> Result<()> {
    let param = store
        .parameter(name)
        .ok_or_else(|| CliError::user(format!("Unknown parameter '{}'", name)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(param)?);
    } else {
        println!(
            "{} = {}  {}",
            param.name,
            param.value,
            format!("# {}", param.category).dimmed()
        );
    }
    Ok(())
}

/// Print every parameter name, sorted.
pub fn run_list(store: &ConfigurationStore, json: bool) -> Result<()> {
    let mut names = store.parameter_names();
    names.sort_unstable();

    if json {
        println!("{}", serde_json::to_string_pretty(&json!(names))?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

/// Print every category in document order.
pub fn run_categories(store: &ConfigurationStore, json: bool) -> Result<()> {
    let categories = store.categories();

    if json {
        println!("{}", serde_json::to_string_pretty(&json!(categories))?);
    } else {
        for category in categories {
            println!("{}", category);
        }
    }
    Ok(())
}

/// Print the sorted parameter names of one category.
pub fn run_category(store: &ConfigurationStore, category: &str, json: bool) -> Result<()> {
    let names = store
        .parameter_names_in_category(category)
        .ok_or_else(|| CliError::user(format!("Unknown category '{}'", category)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&json!(names))?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}
