//! End-to-end integration test for the vertical slice
//!
//! Settings file -> store open -> update -> export -> reopen.

use std::fs;

use pgconf_core::{ConfigurationStore, Settings};
use pgconf_fs::NormalizedPath;
use pgconf_test_utils::{TestDataDir, fixtures};
use tempfile::TempDir;

fn settings_for(data_dir: &TestDataDir, extra: &str) -> (TempDir, Settings) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        format!(
            "data_dir = {:?}\n{}",
            data_dir.path().to_string_lossy(),
            extra
        ),
    )
    .unwrap();
    let settings = Settings::discover(Some(&path)).unwrap();
    (temp, settings)
}

#[test]
fn test_settings_drive_store() {
    let data = TestDataDir::with_document(&fixtures::sample());
    let (_temp, settings) = settings_for(&data, "[persistence]\nlock_timeout_ms = 250\nfsync = false\n");

    assert_eq!(settings.robustness().lock_timeout.as_millis(), 250);
    assert!(!settings.robustness().enable_fsync);

    let data_dir = settings.data_dir.clone().unwrap();
    let store = ConfigurationStore::open_with(&data_dir, settings.store_options()).unwrap();
    assert_eq!(store.parameter("max_connections").unwrap().value, "100");
}

#[test]
fn test_update_export_reopen() {
    let data = TestDataDir::with_document(&fixtures::sample());
    let mut store = ConfigurationStore::open(data.path()).unwrap();

    let previous = store
        .set_parameter_value("max_connections", "200")
        .unwrap()
        .unwrap();
    assert_eq!(previous.value, "100");

    let conf = NormalizedPath::new(data.path()).join("postgresql.conf");
    store.write_key_value_file(&conf).unwrap();
    let text = fs::read_to_string(conf.to_native()).unwrap();
    assert!(text.contains("max_connections = 200\n"));

    drop(store);
    let reopened = ConfigurationStore::open(data.path()).unwrap();
    assert_eq!(reopened.parameter("max_connections").unwrap().value, "200");
    assert_eq!(reopened.export_key_value(), text);
    data.assert_no_temp_files();
}

#[test]
fn test_resource_dir_overrides_bundled_default() {
    let resources = TempDir::new().unwrap();
    fs::write(
        resources.path().join("pgconfiguration.json"),
        r#"{"postgresqlconf": [{"param": "port", "category": "Connections", "value": "6543"}]}"#,
    )
    .unwrap();
    fs::write(resources.path().join("postgresql.conf.header"), "# site header\n").unwrap();

    let data = TestDataDir::new();
    let (_temp, settings) = settings_for(
        &data,
        &format!("resource_dir = {:?}\n", resources.path().to_string_lossy()),
    );

    let store = ConfigurationStore::open_with(data.path(), settings.store_options()).unwrap();

    assert_eq!(store.parameter_names(), vec!["port"]);
    assert_eq!(
        store.export_key_value(),
        "# site header\n\n# Connections\nport = 6543\n"
    );
    assert_eq!(data.value_on_disk("port").as_deref(), Some("6543"));
}
