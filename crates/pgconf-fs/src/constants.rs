//! Well-known file names inside a PostgreSQL data directory.

use std::path::Path;

/// Files pgconf reads or writes inside the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    /// The JSON configuration document (`postgresql.json`)
    Document,
    /// The rendered key/value configuration (`postgresql.conf`)
    ConfFile,
}

impl DataFile {
    /// Get the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "postgresql.json",
            Self::ConfFile => "postgresql.conf",
        }
    }
}

impl AsRef<Path> for DataFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for DataFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for DataFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
