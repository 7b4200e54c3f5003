//! Filesystem layer for pgconf
//!
//! Provides path handling and crash-safe atomic persistence of the
//! configuration document.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use constants::DataFile;
pub use error::{Error, Result};
pub use io::{AtomicWriter, RobustnessConfig};
pub use path::NormalizedPath;
