//! Canned configuration documents.

use serde_json::{Value, json};

/// Build a document from `(name, category, value)` triples.
pub fn document(params: &[(&str, &str, &str)]) -> Value {
    let entries: Vec<Value> = params
        .iter()
        .map(|(name, category, value)| {
            json!({"param": name, "category": category, "value": value})
        })
        .collect();
    json!({ "postgresqlconf": entries })
}

/// A small document with two categories.
///
/// `shared_buffers` precedes `max_connections` in the `Connections`
/// category so that sorted listings differ from document order.
pub fn sample() -> Value {
    document(&[
        ("shared_buffers", "Connections", "128MB"),
        ("max_connections", "Connections", "100"),
        ("fsync", "Write Ahead Log", "on"),
        ("wal_level", "Write Ahead Log", "minimal"),
    ])
}

/// [`sample`] plus top-level sections the store must carry through.
pub fn sample_with_sections() -> Value {
    let mut doc = sample();
    doc["pgversion"] = json!("9.3");
    doc["metadata"] = json!({"generated_by": "initdb", "tags": ["primary", "eu-west"]});
    doc
}
