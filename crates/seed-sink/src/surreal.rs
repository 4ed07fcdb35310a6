//! SurrealDB-backed record sink.

use futures::StreamExt;

use seed_core::Record;

use crate::retry::{with_retry, RetryPolicy};
use crate::serialize::{content, SerializationMode};
use crate::traits::{BatchOutcome, RecordSink, SinkError, WriteFailure};

/// Concurrent writes in flight per batch.
const DEFAULT_WRITE_CONCURRENCY: usize = 16;

/// Classify a SurrealDB error: transaction conflicts and transport drops
/// can succeed on retry, everything else is treated as fatal for the
/// record.
fn classify(error: surrealdb::Error) -> SinkError {
    let message = error.to_string();
    let transient = message.contains("This transaction can be retried")
        || message.contains("read or write conflict")
        || message.contains("Connection reset")
        || message.contains("connection closed")
        || message.contains("timed out");
    if transient {
        SinkError::Transient(message)
    } else {
        SinkError::Fatal(message)
    }
}

/// Sink writing each record as `UPSERT <record-id> CONTENT <payload>`.
///
/// UPSERT by record id makes writes idempotent: a retried write fully
/// overwrites prior content and never duplicates. Batch writes fan out with
/// bounded concurrency and each record carries its own retry budget, so a
/// persistently failing record is reported without holding back the rest.
pub struct SurrealSink {
    client: surrealdb::Surreal<surrealdb::engine::any::Any>,
    mode: SerializationMode,
    policy: RetryPolicy,
    write_concurrency: usize,
}

impl SurrealSink {
    pub fn new(
        client: surrealdb::Surreal<surrealdb::engine::any::Any>,
        mode: SerializationMode,
    ) -> Self {
        Self {
            client,
            mode,
            policy: RetryPolicy::default(),
            write_concurrency: DEFAULT_WRITE_CONCURRENCY,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_write_concurrency(mut self, concurrency: usize) -> Self {
        self.write_concurrency = concurrency.max(1);
        self
    }

    /// One write attempt for one record.
    async fn write_record(&self, table: &str, record: &Record) -> Result<(), SinkError> {
        let record_id = surrealdb::sql::Thing::from((table, record.key.as_str()));
        let payload = content(record, self.mode);

        tracing::trace!(key = %record.key, "upserting record");

        let response = self
            .client
            .query("UPSERT $record_id CONTENT $content")
            .bind(("record_id", record_id))
            .bind(("content", payload))
            .await
            .map_err(classify)?;

        response.check().map_err(classify)?;
        Ok(())
    }

    /// One record delivery with the configured retry budget.
    async fn deliver(&self, table: &str, record: &Record) -> Result<(), SinkError> {
        with_retry(&self.policy, || self.write_record(table, record)).await
    }
}

#[async_trait::async_trait]
impl RecordSink for SurrealSink {
    async fn write_batch(&self, table: &str, batch: &[Record]) -> BatchOutcome {
        tracing::debug!(table, records = batch.len(), "writing batch");

        let pending = (0..batch.len()).map(|i| async move {
            let record = &batch[i];
            (record, self.deliver(table, record).await)
        });
        let results = futures::stream::iter(pending)
            .buffer_unordered(self.write_concurrency)
        .collect::<Vec<_>>()
        .await;

        let mut outcome = BatchOutcome::default();
        for (record, result) in results {
            match result {
                Ok(()) => outcome.delivered += 1,
                Err(error) => {
                    tracing::error!(key = %record.key, %error, "record delivery failed");
                    outcome.failures.push(WriteFailure {
                        ordinal: record.ordinal,
                        key: record.key.clone(),
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            table,
            delivered = outcome.delivered,
            failed = outcome.failures.len(),
            "batch complete"
        );
        outcome
    }
}
