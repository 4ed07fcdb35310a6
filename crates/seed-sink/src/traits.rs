//! RecordSink trait definition and delivery outcome types.

use seed_core::Record;

/// Error type for sink writes.
///
/// The transient/fatal split drives the retry policy: only transient
/// store-level errors are retried, programming and serialization errors
/// fail immediately.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Store-level error that may succeed on retry (conflicts, timeouts,
    /// dropped connections)
    #[error("transient store error: {0}")]
    Transient(String),

    /// Non-retriable error
    #[error("store error: {0}")]
    Fatal(String),

    /// A transient error survived the full retry budget
    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl SinkError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SinkError::Transient(_))
    }
}

/// One record that could not be delivered.
#[derive(Debug)]
pub struct WriteFailure {
    pub ordinal: u64,
    pub key: String,
    pub error: SinkError,
}

/// Result of writing one batch: delivered count plus explicit failures —
/// never a silent count-only result.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub delivered: usize,
    pub failures: Vec<WriteFailure>,
}

impl BatchOutcome {
    /// Fold another batch's outcome into this one.
    pub fn merge(&mut self, other: BatchOutcome) {
        self.delivered += other.delivered;
        self.failures.extend(other.failures);
    }
}

/// Trait for persisting batches of generated records.
///
/// Implementations must isolate per-record failures: one failing record is
/// reported in the outcome, the rest of the batch is still written. Writes
/// are idempotent by key — a retried write fully overwrites prior content.
#[async_trait::async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist a batch under the given table, blocking until every record
    /// has either been delivered or given up on.
    async fn write_batch(&self, table: &str, batch: &[Record]) -> BatchOutcome;
}
