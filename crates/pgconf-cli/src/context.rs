//! Store context resolution
//!
//! Works out which settings apply and which data directory to open, the
//! way `pg_ctl` does: an explicit `--pgdata` (or `PGDATA`) first, then the
//! settings file.

use std::path::{Path, PathBuf};

use pgconf_core::{ConfigurationStore, Settings};
use tracing::debug;

use crate::error::{CliError, Result};

/// Pick the data directory from the command line or the settings.
pub fn resolve_data_dir(pgdata: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    pgdata
        .map(Path::to_path_buf)
        .or_else(|| settings.data_dir.clone())
        .ok_or_else(|| {
            CliError::user(
                "No data directory. Pass --pgdata, set PGDATA, or set data_dir in the settings file",
            )
        })
}

/// Load settings and open the configuration store.
pub fn open_store(pgdata: Option<&Path>, config: Option<&Path>) -> Result<ConfigurationStore> {
    let settings = Settings::discover(config)?;
    let data_dir = resolve_data_dir(pgdata, &settings)?;
    debug!(data_dir = %data_dir.display(), "Opening configuration store");
    Ok(ConfigurationStore::open_with(
        &data_dir,
        settings.store_options(),
    )?)
}
