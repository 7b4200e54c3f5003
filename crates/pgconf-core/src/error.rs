//! Error types for pgconf-core

use std::path::PathBuf;

/// Result type for pgconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pgconf-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The on-disk document exists but could not be read
    #[error("Error reading the {path} file: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The on-disk document is not a valid configuration document
    #[error("{path} format is invalid: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A bundled resource could not be obtained
    #[error("Internal resource {resource} is unavailable: {message}")]
    ResourceUnavailable { resource: String, message: String },

    /// The bundled default document is not a valid configuration document
    #[error("Internal resource {resource} is invalid: {source}")]
    MalformedResource {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// First-run persistence of the bundled default failed
    #[error("Error writing a new {path} file: {source}")]
    Bootstrap {
        path: PathBuf,
        #[source]
        source: pgconf_fs::Error,
    },

    /// Persisting the in-memory configuration failed
    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: pgconf_fs::Error,
    },

    /// The settings file could not be parsed
    #[error("Invalid settings in {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Filesystem error from pgconf-fs
    #[error(transparent)]
    Fs(#[from] pgconf_fs::Error),
}

impl Error {
    /// Whether this error must abort startup.
    ///
    /// Load and bootstrap failures leave no usable store behind.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Unreadable { .. }
                | Self::MalformedDocument { .. }
                | Self::ResourceUnavailable { .. }
                | Self::MalformedResource { .. }
                | Self::Bootstrap { .. }
        )
    }
}
