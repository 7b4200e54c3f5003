//! Resolves and loads the configuration document
//!
//! The on-disk `postgresql.json` is the source of truth once it exists. In a
//! fresh data directory the bundled default is parsed instead and written
//! to disk before the loader returns, so every later run reads the file.

use pgconf_fs::{AtomicWriter, DataFile, NormalizedPath};
use tracing::{debug, error, info};

use crate::model::ConfigDocument;
use crate::resources::{self, ResourceProvider};
use crate::{Error, Result};

/// Loads the configuration document for a data directory.
///
/// Every error returned by [`ConfigurationLoader::load`] is fatal.
#[derive(Debug)]
pub struct ConfigurationLoader<'a> {
    resources: &'a dyn ResourceProvider,
    writer: &'a AtomicWriter,
}

impl<'a> ConfigurationLoader<'a> {
    /// Create a loader that bootstraps from `resources` and persists with
    /// `writer`.
    pub fn new(resources: &'a dyn ResourceProvider, writer: &'a AtomicWriter) -> Self {
        Self { resources, writer }
    }

    /// Load the document for `data_dir`, bootstrapping it if needed.
    pub fn load(&self, data_dir: &NormalizedPath) -> Result<ConfigDocument> {
        let path = data_dir.join(DataFile::Document);

        if path.exists() {
            self.read_existing(&path)
        } else {
            self.bootstrap(&path)
        }
    }

    fn read_existing(&self, path: &NormalizedPath) -> Result<ConfigDocument> {
        let text = pgconf_fs::io::read_text(path).map_err(|e| {
            error!(path = %path, error = %e, "Error reading the {} file", DataFile::Document);
            match e {
                pgconf_fs::Error::Io { path, source } => Error::Unreadable { path, source },
                other => Error::Fs(other),
            }
        })?;

        let document = ConfigDocument::from_json(&text).map_err(|source| {
            error!(path = %path, error = %source, "{} format is invalid", DataFile::Document);
            Error::MalformedDocument {
                path: path.to_native(),
                source,
            }
        })?;

        debug!(path = %path, parameters = document.parameters.len(), "Loaded configuration");
        Ok(document)
    }

    fn bootstrap(&self, path: &NormalizedPath) -> Result<ConfigDocument> {
        let text = self.resources.default_document().inspect_err(|e| {
            error!(error = %e, "Error reading the internal {} resource", resources::DEFAULT_DOCUMENT);
        })?;

        let document = ConfigDocument::from_json(&text).map_err(|source| {
            error!(error = %source, "Internal {} resource is invalid", resources::DEFAULT_DOCUMENT);
            Error::MalformedResource {
                resource: resources::DEFAULT_DOCUMENT.to_string(),
                source,
            }
        })?;

        info!(path = %path, "Generating a new {} file", DataFile::Document);
        document.save(self.writer, path).map_err(|source| {
            error!(path = %path, error = %source, "Error writing a new {} file", DataFile::Document);
            Error::Bootstrap {
                path: path.to_native(),
                source,
            }
        })?;

        Ok(document)
    }
}
