//! [`TestDataDir`] builder for PostgreSQL data-directory scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

const DOCUMENT: &str = "postgresql.json";

/// A temporary data directory with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use pgconf_test_utils::{TestDataDir, fixtures};
///
/// let dir = TestDataDir::with_document(&fixtures::sample());
/// dir.assert_document_contains("shared_buffers");
/// ```
pub struct TestDataDir {
    temp_dir: TempDir,
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDataDir {
    /// Create an empty data directory (first-run scenario).
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a data directory holding `document` as `postgresql.json`.
    pub fn with_document(document: &Value) -> Self {
        let dir = Self::new();
        dir.write_document_text(&serde_json::to_string_pretty(document).unwrap());
        dir
    }

    /// Create a data directory holding raw text as `postgresql.json`.
    pub fn with_document_text(text: &str) -> Self {
        let dir = Self::new();
        dir.write_document_text(text);
        dir
    }

    /// Return the root path of the data directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `postgresql.json`.
    pub fn document_path(&self) -> PathBuf {
        self.path().join(DOCUMENT)
    }

    /// Overwrite `postgresql.json` with raw text.
    pub fn write_document_text(&self, text: &str) {
        fs::write(self.document_path(), text).unwrap();
    }

    /// Raw bytes of `postgresql.json`.
    pub fn read_document_bytes(&self) -> Vec<u8> {
        fs::read(self.document_path())
            .unwrap_or_else(|_| panic!("Could not read {}", self.document_path().display()))
    }

    /// Text of `postgresql.json`.
    pub fn read_document(&self) -> String {
        String::from_utf8(self.read_document_bytes()).unwrap()
    }

    /// `postgresql.json` parsed as JSON.
    pub fn document_json(&self) -> Value {
        serde_json::from_str(&self.read_document()).unwrap()
    }

    /// Value of a parameter as currently stored on disk.
    pub fn value_on_disk(&self, name: &str) -> Option<String> {
        self.document_json()["postgresqlconf"]
            .as_array()?
            .iter()
            .rev()
            .find(|p| p["param"] == name)
            .and_then(|p| p["value"].as_str().map(str::to_string))
    }

    /// Assert that `postgresql.json` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_document_contains(&self, content: &str) {
        let text = self.read_document();
        assert!(
            text.contains(content),
            "{} does not contain expected content.\nExpected: {}\nActual: {}",
            self.document_path().display(),
            content,
            text
        );
    }

    /// Assert that no temporary files were left in the data directory.
    pub fn assert_no_temp_files(&self) {
        let leftovers: Vec<_> = fs::read_dir(self.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "Temporary files left behind: {:?}", leftovers);
    }
}
