//! Configuration document model
//!
//! The on-disk document is a JSON object whose `postgresqlconf` array holds
//! the parameters. Every other top-level field, and every unknown field on a
//! parameter object, is carried through untouched.

use pgconf_fs::{AtomicWriter, NormalizedPath};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single named configuration setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Unique parameter name, e.g. `shared_buffers`
    #[serde(rename = "param")]
    pub name: String,
    /// Grouping label used for listing and export
    pub category: String,
    /// Raw value; never validated
    pub value: String,
    /// Fields this crate does not interpret
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl Parameter {
    /// Create a parameter with no extra fields.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// The whole configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// The indexed parameter list, in document order
    #[serde(rename = "postgresqlconf")]
    pub parameters: Vec<Parameter>,
    /// Other top-level sections, preserved but never indexed
    #[serde(default, flatten)]
    pub sections: Map<String, Value>,
}

impl ConfigDocument {
    /// Create a document holding only the given parameters.
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            sections: Map::new(),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Serialize as pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Atomically write this document to `path`.
    ///
    /// Serialization streams straight into the writer's temporary file.
    pub fn save(&self, writer: &AtomicWriter, path: &NormalizedPath) -> pgconf_fs::Result<()> {
        writer.write_with(path, |out| {
            serde_json::to_writer_pretty(&mut *out, self)?;
            out.write_all(b"\n")
        })
    }
}
