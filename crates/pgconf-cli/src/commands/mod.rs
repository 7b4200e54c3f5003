//! Command implementations for pgconf-cli

pub mod export;
pub mod query;
pub mod set;

pub use export::{run_export, run_persist};
pub use query::{run_categories, run_category, run_get, run_list, run_pgdata};
pub use set::run_set;
