//! The configuration store
//!
//! [`ConfigurationStore`] owns the loaded document and its indexes. Reads
//! are served from the indexes; every successful mutation rewrites the whole
//! document atomically before returning, so the store never holds unflushed
//! state.
//!
//! Mutations take `&mut self`. Share a store between threads behind an
//! `RwLock` (or similar); [`ConfigurationStore::persist`] only needs `&self`
//! and is serialized by the store's own writer lock.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use pgconf_fs::{AtomicWriter, DataFile, NormalizedPath, RobustnessConfig};
use tracing::{debug, info, warn};

use crate::export::render_key_value;
use crate::index::ParameterIndex;
use crate::loader::ConfigurationLoader;
use crate::model::{ConfigDocument, Parameter};
use crate::resources::{BundledResources, ResourceProvider};
use crate::{Error, Result};

/// Options for opening a [`ConfigurationStore`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Lock timeout and fsync behaviour for every write
    pub robustness: RobustnessConfig,
    /// Where the default document and export header come from
    pub resources: Arc<dyn ResourceProvider>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            robustness: RobustnessConfig::default(),
            resources: Arc::new(BundledResources),
        }
    }
}

impl StoreOptions {
    /// Replace the resource provider.
    pub fn with_resources(mut self, resources: impl ResourceProvider + 'static) -> Self {
        self.resources = Arc::new(resources);
        self
    }

    /// Replace the robustness settings.
    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }
}

/// In-memory configuration with atomic durable persistence.
#[derive(Debug)]
pub struct ConfigurationStore {
    data_dir: NormalizedPath,
    document: ConfigDocument,
    index: ParameterIndex,
    writer: AtomicWriter,
    resources: Arc<dyn ResourceProvider>,
}

impl ConfigurationStore {
    /// Open the store for `data_dir` with bundled resources.
    ///
    /// # Errors
    ///
    /// Any error is fatal: the document is unreadable or malformed, or a
    /// fresh data directory could not be bootstrapped.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(data_dir, StoreOptions::default())
    }

    /// Open the store for `data_dir` with explicit options.
    pub fn open_with(data_dir: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
        let data_dir = NormalizedPath::new(data_dir).absolute()?;
        let writer = AtomicWriter::with_robustness(options.robustness);

        let document = ConfigurationLoader::new(options.resources.as_ref(), &writer).load(&data_dir)?;
        let index = ParameterIndex::build(&document.parameters);

        debug!(
            data_dir = %data_dir,
            parameters = index.len(),
            "Configuration store ready"
        );

        Ok(Self {
            data_dir,
            document,
            index,
            writer,
            resources: options.resources,
        })
    }

    /// Absolute path of the data directory.
    pub fn data_dir(&self) -> &NormalizedPath {
        &self.data_dir
    }

    /// Path of the JSON document inside the data directory.
    pub fn document_path(&self) -> NormalizedPath {
        self.data_dir.join(DataFile::Document)
    }

    /// Path of the exported `postgresql.conf` inside the data directory.
    pub fn conf_path(&self) -> NormalizedPath {
        self.data_dir.join(DataFile::ConfFile)
    }

    /// The full document, including pass-through sections.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// The name and category indexes.
    pub fn index(&self) -> &ParameterIndex {
        &self.index
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.index
            .get(name)
            .map(|id| &self.document.parameters[id.slot()])
    }

    /// Every indexed parameter in document order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.document
            .parameters
            .iter()
            .enumerate()
            .filter(|(slot, param)| {
                self.index
                    .get(&param.name)
                    .is_some_and(|id| id.slot() == *slot)
            })
            .map(|(_, param)| param)
    }

    /// All parameter names, in no guaranteed order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.index.names().collect()
    }

    /// All categories, in first-encounter order.
    pub fn categories(&self) -> Vec<&str> {
        self.index.categories().collect()
    }

    /// Sorted parameter names of a category, or `None` for an unknown
    /// category.
    pub fn parameter_names_in_category(&self, category: &str) -> Option<BTreeSet<&str>> {
        let members = self.index.category(category)?;
        Some(
            members
                .iter()
                .map(|id| self.document.parameters[id.slot()].name.as_str())
                .collect(),
        )
    }

    /// Set a parameter's value and persist the whole configuration.
    ///
    /// Returns the parameter as it was before the update, or `None` when no
    /// parameter has that name (nothing is changed or written then). No
    /// validation is applied to `value`.
    ///
    /// # Errors
    ///
    /// [`Error::Persist`] when the write fails. The in-memory value has
    /// already changed at that point; call [`ConfigurationStore::persist`]
    /// to retry.
    pub fn set_parameter_value(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<Parameter>> {
        let Some(id) = self.index.get(name) else {
            debug!(param = name, "Ignoring update of unknown parameter");
            return Ok(None);
        };

        let param = &mut self.document.parameters[id.slot()];
        let previous = param.clone();
        param.value = value.into();
        info!(
            param = name,
            old = %previous.value,
            new = %param.value,
            "Parameter updated"
        );

        self.persist()?;
        Ok(Some(previous))
    }

    /// Render the configuration as `postgresql.conf` text.
    ///
    /// An unavailable header is logged and skipped.
    pub fn export_key_value(&self) -> String {
        let header = match self.resources.conf_header() {
            Ok(header) => Some(header),
            Err(e) => {
                warn!(error = %e, "Unable to read export header; continuing without it");
                None
            }
        };

        let params = &self.document.parameters;
        render_key_value(
            header.as_deref(),
            self.index.buckets().map(move |(category, members)| {
                (category, members.iter().map(move |id| &params[id.slot()]))
            }),
        )
    }

    /// Atomically write the key/value rendering to `path`.
    pub fn write_key_value_file(&self, path: &NormalizedPath) -> Result<()> {
        let text = self.export_key_value();
        self.writer
            .write(path, text.as_bytes())
            .map_err(|source| Error::Persist {
                path: path.to_native(),
                source,
            })
    }

    /// Re-serialize the current configuration and write it atomically.
    pub fn persist(&self) -> Result<()> {
        let path = self.document_path();
        self.document
            .save(&self.writer, &path)
            .map_err(|source| Error::Persist {
                path: path.to_native(),
                source,
            })?;
        debug!(path = %path, "Persisted configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"{
        "postgresqlconf": [
            {"param": "shared_buffers", "category": "Connections", "value": "128MB"},
            {"param": "max_connections", "category": "Connections", "value": "100"},
            {"param": "fsync", "category": "Write Ahead Log", "value": "on"}
        ]
    }"#;

    fn open_with_doc(doc: &str) -> (tempfile::TempDir, ConfigurationStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("postgresql.json"), doc).unwrap();
        let store = ConfigurationStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn data_dir_is_absolute() {
        let (_dir, store) = open_with_doc(DOC);
        assert!(store.data_dir().to_native().is_absolute());
    }

    #[test]
    fn category_listing_is_sorted() {
        let (_dir, store) = open_with_doc(DOC);
        let names: Vec<_> = store
            .parameter_names_in_category("Connections")
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(names, vec!["max_connections", "shared_buffers"]);
        assert!(store.parameter_names_in_category("Nope").is_none());
    }

    #[test]
    fn update_is_visible_through_every_view() {
        let (_dir, mut store) = open_with_doc(DOC);

        let previous = store
            .set_parameter_value("shared_buffers", "256MB")
            .unwrap()
            .unwrap();

        assert_eq!(previous.value, "128MB");
        assert_eq!(store.parameter("shared_buffers").unwrap().value, "256MB");
        assert_eq!(store.document().parameters[0].value, "256MB");
        assert!(store.export_key_value().contains("shared_buffers = 256MB\n"));
    }

    #[test]
    fn unknown_parameter_is_not_found() {
        let (_dir, mut store) = open_with_doc(DOC);
        assert!(store.parameter("nonexistent").is_none());
        assert!(store.set_parameter_value("nonexistent", "x").unwrap().is_none());
    }

    #[test]
    fn shadowed_duplicates_are_hidden_from_parameters() {
        let (_dir, store) = open_with_doc(
            r#"{"postgresqlconf": [
                {"param": "port", "category": "Connections", "value": "5432"},
                {"param": "port", "category": "Connections", "value": "6543"}
            ]}"#,
        );

        let visible: Vec<_> = store.parameters().map(|p| p.value.as_str()).collect();
        assert_eq!(visible, vec!["6543"]);
        assert_eq!(store.document().parameters.len(), 2);
    }
}
