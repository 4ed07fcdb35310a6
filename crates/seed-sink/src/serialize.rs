//! Record serialization for the two sink modes.

use std::collections::BTreeMap;

use seed_core::Record;

/// How records are laid out under their key in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationMode {
    /// Field-name → stringified-value pairs
    FlatMap,
    /// One typed JSON document
    #[default]
    Document,
}

/// Flat-map form: every field value stringified.
pub fn flat_map(record: &Record) -> BTreeMap<String, String> {
    record
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.value.to_display_string()))
        .collect()
}

/// Document form: one JSON object with typed values.
pub fn document(record: &Record) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = record
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.value.to_json()))
        .collect();
    serde_json::Value::Object(map)
}

/// The store payload for a record under the given mode. Flat-map values
/// become a JSON object of strings so both modes share a wire shape.
pub fn content(record: &Record, mode: SerializationMode) -> serde_json::Value {
    match mode {
        SerializationMode::Document => document(record),
        SerializationMode::FlatMap => {
            let map: serde_json::Map<String, serde_json::Value> = flat_map(record)
                .into_iter()
                .map(|(name, value)| (name, serde_json::Value::String(value)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}
