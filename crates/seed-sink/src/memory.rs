//! In-memory sink, used by sample mode and tests.

use std::sync::Mutex;

use seed_core::Record;

use crate::serialize::{content, SerializationMode};
use crate::traits::{BatchOutcome, RecordSink};

/// Sink that keeps serialized documents in memory instead of writing to a
/// store. Every write is delivered.
#[derive(Debug, Default)]
pub struct MemorySink {
    mode: SerializationMode,
    records: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MemorySink {
    pub fn new(mode: SerializationMode) -> Self {
        Self {
            mode,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Stored (key, document) pairs in arrival order.
    pub fn documents(&self) -> Vec<(String, serde_json::Value)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl RecordSink for MemorySink {
    async fn write_batch(&self, _table: &str, batch: &[Record]) -> BatchOutcome {
        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for record in batch {
            tracing::debug!(key = %record.key, "storing record in memory");
            records.push((record.key.clone(), content(record, self.mode)));
        }
        BatchOutcome {
            delivered: batch.len(),
            failures: Vec::new(),
        }
    }
}
