//! Data directory lifecycle scenarios
//!
//! Each test walks a data directory through several process lifetimes, the
//! way a server restart would.

use std::fs;

use pgconf_core::{ConfigurationStore, Error};
use pgconf_test_utils::{TestDataDir, fixtures};

#[test]
fn fresh_directory_is_bootstrapped_once() {
    let data = TestDataDir::new();

    let mut first = ConfigurationStore::open(data.path()).unwrap();
    first.set_parameter_value("shared_buffers", "1GB").unwrap().unwrap();
    drop(first);

    // The second run must read the edited file, not the bundled default
    let second = ConfigurationStore::open(data.path()).unwrap();
    assert_eq!(second.parameter("shared_buffers").unwrap().value, "1GB");
}

#[test]
fn manual_edit_between_runs_is_picked_up() {
    let data = TestDataDir::with_document(&fixtures::sample());
    drop(ConfigurationStore::open(data.path()).unwrap());

    data.write_document_text(
        &serde_json::to_string(&fixtures::document(&[("port", "Connections", "7000")])).unwrap(),
    );

    let store = ConfigurationStore::open(data.path()).unwrap();
    assert_eq!(store.parameter_names(), vec!["port"]);
    assert!(store.parameter("shared_buffers").is_none());
}

#[test]
fn corruption_between_runs_is_fatal() {
    let data = TestDataDir::with_document(&fixtures::sample());
    drop(ConfigurationStore::open(data.path()).unwrap());

    fs::write(data.document_path(), "{\"postgresqlconf\": [").unwrap();

    let err = ConfigurationStore::open(data.path()).unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));
    assert!(err.is_fatal());
}

#[test]
fn stale_temp_file_does_not_affect_load() {
    let data = TestDataDir::with_document(&fixtures::sample());
    fs::write(data.path().join(".postgresql.json.999999.tmp"), "garbage").unwrap();

    let mut store = ConfigurationStore::open(data.path()).unwrap();
    store.set_parameter_value("fsync", "off").unwrap().unwrap();

    assert_eq!(data.value_on_disk("fsync").as_deref(), Some("off"));
}

#[test]
fn many_sequential_updates_keep_document_valid() {
    let data = TestDataDir::with_document(&fixtures::sample());
    let mut store = ConfigurationStore::open(data.path()).unwrap();

    for i in 0..50 {
        store
            .set_parameter_value("max_connections", i.to_string())
            .unwrap()
            .unwrap();
        assert_eq!(data.value_on_disk("max_connections"), Some(i.to_string()));
    }

    assert_eq!(data.document_json()["postgresqlconf"].as_array().unwrap().len(), 4);
}
