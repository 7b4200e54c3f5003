//! Indexed PostgreSQL configuration store with atomic persistence
//!
//! The configuration lives in `postgresql.json` inside a data directory. It
//! is loaded once (bootstrapped from a bundled default on first run),
//! indexed by name and by category, and rewritten atomically on every
//! change.
//!
//! ```no_run
//! use pgconf_core::ConfigurationStore;
//!
//! let mut store = ConfigurationStore::open("/var/lib/postgresql/data")?;
//! if let Some(previous) = store.set_parameter_value("shared_buffers", "256MB")? {
//!     println!("was {}", previous.value);
//! }
//! print!("{}", store.export_key_value());
//! # Ok::<(), pgconf_core::Error>(())
//! ```

pub mod error;
pub mod export;
pub mod index;
pub mod loader;
pub mod model;
pub mod resources;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
pub use index::{ParameterId, ParameterIndex};
pub use loader::ConfigurationLoader;
pub use model::{ConfigDocument, Parameter};
pub use resources::{BundledResources, DirectoryResources, ResourceProvider};
pub use settings::Settings;
pub use store::{ConfigurationStore, StoreOptions};
