//! Shared test utilities for the pgconf workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`data_dir`]: [`TestDataDir`] builder for data-directory scenarios
//! - [`fixtures`]: canned configuration documents

pub mod data_dir;
pub mod fixtures;

pub use data_dir::TestDataDir;
