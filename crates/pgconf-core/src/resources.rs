//! Bundled resources: the default document and the `postgresql.conf` header
//!
//! Resources are reached through [`ResourceProvider`] so a deployment can
//! replace the compiled-in copies with files from a directory.

use std::borrow::Cow;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::{Error, Result};

/// Resource name of the default configuration document.
pub const DEFAULT_DOCUMENT: &str = "pgconfiguration.json";

/// Resource name of the header prepended to key/value exports.
pub const CONF_HEADER: &str = "postgresql.conf.header";

const BUNDLED_DOCUMENT: &str = include_str!("../resources/pgconfiguration.json");
const BUNDLED_HEADER: &str = include_str!("../resources/postgresql.conf.header");

/// Source of the read-only resources the store needs.
pub trait ResourceProvider: Debug + Send + Sync {
    /// JSON text of the first-run default document.
    fn default_document(&self) -> Result<Cow<'static, str>>;

    /// Plain-text header for key/value exports.
    fn conf_header(&self) -> Result<Cow<'static, str>>;
}

/// Resources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl ResourceProvider for BundledResources {
    fn default_document(&self) -> Result<Cow<'static, str>> {
        Ok(Cow::Borrowed(BUNDLED_DOCUMENT))
    }

    fn conf_header(&self) -> Result<Cow<'static, str>> {
        Ok(Cow::Borrowed(BUNDLED_HEADER))
    }
}

/// Resources read from a directory at the time they are needed.
///
/// The directory holds `pgconfiguration.json` and `postgresql.conf.header`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, resource: &str) -> Result<Cow<'static, str>> {
        let path = self.root.join(resource);
        std::fs::read_to_string(&path)
            .map(Cow::Owned)
            .map_err(|e| Error::ResourceUnavailable {
                resource: resource.to_string(),
                message: format!("{}: {}", path.display(), e),
            })
    }
}

impl ResourceProvider for DirectoryResources {
    fn default_document(&self) -> Result<Cow<'static, str>> {
        self.read(DEFAULT_DOCUMENT)
    }

    fn conf_header(&self) -> Result<Cow<'static, str>> {
        self.read(CONF_HEADER)
    }
}
