//! User settings for pgconf, read from TOML
//!
//! ```toml
//! data_dir = "/var/lib/postgresql/data"
//! resource_dir = "/etc/pgconf/resources"
//!
//! [persistence]
//! lock_timeout_ms = 5000
//! fsync = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use pgconf_fs::{NormalizedPath, RobustnessConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resources::DirectoryResources;
use crate::store::StoreOptions;
use crate::{Error, Result};

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Data directory used when none is given on the command line
    pub data_dir: Option<PathBuf>,
    /// Directory overriding the bundled resources
    pub resource_dir: Option<PathBuf>,
    /// Write behaviour
    pub persistence: PersistenceSettings,
}

/// The `[persistence]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    pub lock_timeout_ms: u64,
    pub fsync: bool,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        let robustness = RobustnessConfig::default();
        Self {
            lock_timeout_ms: robustness.lock_timeout.as_millis() as u64,
            fsync: robustness.enable_fsync,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load settings from a file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let text = pgconf_fs::io::read_text(&NormalizedPath::new(path))?;
        Self::from_toml(&text).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Per-user settings location, e.g. `~/.config/pgconf/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pgconf").join("config.toml"))
    }

    /// Resolve settings: an explicit file must load; otherwise the per-user
    /// file is used when present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path().filter(|path| path.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "Using per-user settings");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Robustness settings for the atomic writer.
    pub fn robustness(&self) -> RobustnessConfig {
        RobustnessConfig {
            lock_timeout: Duration::from_millis(self.persistence.lock_timeout_ms),
            enable_fsync: self.persistence.fsync,
        }
    }

    /// Options for [`crate::ConfigurationStore::open_with`].
    pub fn store_options(&self) -> StoreOptions {
        let options = StoreOptions::default().with_robustness(self.robustness());
        match &self.resource_dir {
            Some(dir) => options.with_resources(DirectoryResources::new(dir)),
            None => options,
        }
    }
}
