//! The store shared across threads the way a request handler would share it

use pgconf_core::ConfigurationStore;
use pgconf_test_utils::{TestDataDir, fixtures};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, RwLock};
use std::thread;

#[test]
fn concurrent_persist_calls_leave_valid_document() {
    let dir = TestDataDir::new();
    let store = Arc::new(ConfigurationStore::open(dir.path()).unwrap());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..10 {
                    store.persist().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }

    let reloaded = ConfigurationStore::open(dir.path()).unwrap();
    assert_eq!(reloaded.document(), store.document());
    dir.assert_no_temp_files();
}

#[test]
fn serialized_mutations_from_many_threads_are_all_durable() {
    let dir = TestDataDir::with_document(&fixtures::sample());
    let store = Arc::new(RwLock::new(ConfigurationStore::open(dir.path()).unwrap()));
    let names = ["shared_buffers", "max_connections", "fsync", "wal_level"];

    let handles: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let store = Arc::clone(&store);
            let name = name.to_string();
            thread::spawn(move || {
                for round in 0..5 {
                    let value = format!("t{}-r{}", i, round);
                    store
                        .write()
                        .unwrap()
                        .set_parameter_value(&name, value)
                        .unwrap()
                        .expect("parameter exists");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }

    for (i, name) in names.iter().enumerate() {
        assert_eq!(dir.value_on_disk(name), Some(format!("t{}-r4", i)));
    }
}

#[test]
#[cfg_attr(windows, ignore = "readers holding the file block rename on Windows")]
fn readers_always_see_a_parseable_document() {
    let dir = TestDataDir::new();
    let mut store = ConfigurationStore::open(dir.path()).unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let done = Arc::clone(&done);
        let path = dir.document_path();
        thread::spawn(move || {
            let mut reads = 0;
            while !done.load(Ordering::Acquire) {
                let text = std::fs::read_to_string(&path).unwrap();
                serde_json::from_str::<serde_json::Value>(&text)
                    .expect("document must never be observed half-written");
                reads += 1;
            }
            reads
        })
    };

    let long_value = "x".repeat(64 * 1024);
    for i in 0..30 {
        let value = if i % 2 == 0 { long_value.clone() } else { i.to_string() };
        store.set_parameter_value("shared_buffers", value).unwrap();
    }
    done.store(true, Ordering::Release);

    assert!(reader.join().expect("reader should not panic") > 0);
}
