//! Bounded worker-pool record factory.
//!
//! A [`RecordFactory`] produces exactly `count` records for one table,
//! capping in-flight memory with a bounded queue:
//!
//! - A fixed set of worker tasks claim ordinals by atomically incrementing
//!   the table's shared counter, independently build one record each, and
//!   submit it to a bounded channel. When the channel is full the workers
//!   block, which is the pipeline's backpressure.
//! - One driver drains the channel with [`RecordFactory::collect`], using a
//!   dequeue timeout so a stalled pipeline surfaces as an early stop rather
//!   than a hang.
//! - Per-record generation errors go to a dedicated error channel and the
//!   worker moves on to the next ordinal; one bad record never stops the
//!   table.
//!
//! Records complete out of order across workers; callers must not depend on
//! ordinal ordering in the output stream. Sequential-number uniqueness is
//! carried by the atomic counter, not by completion order.
//!
//! [`RecordFactory::stop`] closes the queue and joins every worker before
//! reporting failures, so in-flight work is never silently dropped.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use seed_core::{Record, TableSpec};
use seed_refdata::ReferenceData;

use crate::record::RecordGenerator;
use crate::template::TemplateEngine;
use crate::GeneratorError;

/// Tuning knobs for the worker pool.
///
/// Queue capacity and batch size are deliberately independent settings; the
/// queue bounds producer memory while the caller's batch size shapes sink
/// flushes.
#[derive(Debug, Clone)]
pub struct FactoryOptions {
    /// Fixed worker task count
    pub workers: usize,
    /// Bounded record queue capacity
    pub queue_capacity: usize,
    /// Driver dequeue timeout; exceeding it signals a stalled pipeline
    pub dequeue_timeout: Duration,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            workers: 8,
            queue_capacity: 32,
            dequeue_timeout: Duration::from_secs(5),
        }
    }
}

/// A per-record generation failure, reported out of band.
#[derive(Debug)]
pub struct GenerationFailure {
    /// Ordinal the failure belongs to; `None` when a whole worker died
    pub ordinal: Option<u64>,
    pub error: GeneratorError,
}

/// Worker pool + queue for one table's generation run.
pub struct RecordFactory {
    records: mpsc::Receiver<Record>,
    errors: mpsc::UnboundedReceiver<GenerationFailure>,
    workers: Vec<JoinHandle<()>>,
    dequeue_timeout: Duration,
    stalled: bool,
}

impl RecordFactory {
    /// Start generating `count` records at ordinal `start`.
    ///
    /// Resets the table's shared counter and spawns the worker pool; records
    /// begin accumulating in the bounded queue immediately.
    pub fn start(
        table: Arc<TableSpec>,
        refdata: Arc<ReferenceData>,
        start: u64,
        count: u64,
        options: FactoryOptions,
    ) -> Self {
        table.reset_ordinal(start);
        let end = start + count;

        let (record_tx, records) = mpsc::channel(options.queue_capacity.max(1));
        let (error_tx, errors) = mpsc::unbounded_channel();

        let workers = (0..options.workers.max(1))
            .map(|worker| {
                let table = Arc::clone(&table);
                let refdata = Arc::clone(&refdata);
                let record_tx = record_tx.clone();
                let error_tx = error_tx.clone();

                tokio::spawn(async move {
                    let mut rng = StdRng::from_entropy();
                    let engine = TemplateEngine::new();
                    let generator = RecordGenerator::new(&table, &refdata, &engine);

                    loop {
                        let ordinal = table.claim_ordinal();
                        if ordinal >= end {
                            break;
                        }
                        match generator.generate(ordinal, &mut rng) {
                            Ok(record) => {
                                // send blocks when the queue is full; an
                                // Err means the driver stopped the run
                                if record_tx.send(record).await.is_err() {
                                    break;
                                }
                            }
                            Err(error) => {
                                tracing::warn!(
                                    table = %table.name,
                                    worker,
                                    ordinal,
                                    %error,
                                    "record generation failed"
                                );
                                let _ = error_tx.send(GenerationFailure {
                                    ordinal: Some(ordinal),
                                    error,
                                });
                            }
                        }
                    }
                    tracing::debug!(table = %table.name, worker, "worker finished");
                })
            })
            .collect();

        Self {
            records,
            errors,
            workers,
            dequeue_timeout: options.dequeue_timeout,
            stalled: false,
        }
    }

    /// Drain up to `quantity` records from the queue.
    ///
    /// Returns early (possibly empty) when all workers have finished or when
    /// the dequeue timeout fires; a timeout marks the factory stalled.
    pub async fn collect(&mut self, quantity: usize) -> Vec<Record> {
        let mut batch = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            match timeout(self.dequeue_timeout, self.records.recv()).await {
                Ok(Some(record)) => batch.push(record),
                // channel closed and drained: every worker is done
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = self.dequeue_timeout.as_secs(),
                        "timed out waiting on the record queue; stopping table early"
                    );
                    self.stalled = true;
                    break;
                }
            }
        }
        batch
    }

    /// Whether a dequeue timeout fired during this run.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Stop the run: close the queue, join every worker, and return the
    /// accumulated per-record failures.
    pub async fn stop(mut self) -> Vec<GenerationFailure> {
        // Closing the receiver unblocks any worker waiting on a full queue.
        self.records.close();

        let mut failures = Vec::new();
        for handle in self.workers.drain(..) {
            if let Err(join_error) = handle.await {
                failures.push(GenerationFailure {
                    ordinal: None,
                    error: GeneratorError::Worker(join_error.to_string()),
                });
            }
        }

        self.errors.close();
        while let Ok(failure) = self.errors.try_recv() {
            failures.push(failure);
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::{FieldValue, SchemaCollection};
    use seed_refdata::{NameRecord, ProductRecord, ReferenceTables};
    use std::collections::HashSet;

    const SCHEMA: &str = r#"
name: s
tables:
  - name: users
    count: 40
    keyFormat: "{{table}}:{{id}}"
    columns:
      - name: id
        type: sequentialNumber
        primaryKey: true
      - name: name
        type: firstName
      - name: active
        type: boolean
"#;

    fn users_table() -> Arc<TableSpec> {
        SchemaCollection::from_str(SCHEMA)
            .unwrap()
            .validate()
            .unwrap()
            .tables[0]
            .clone()
    }

    async fn drain(factory: &mut RecordFactory, chunk: usize) -> Vec<Record> {
        let mut all = Vec::new();
        loop {
            let batch = factory.collect(chunk).await;
            if batch.is_empty() {
                break;
            }
            all.extend(batch);
        }
        all
    }

    fn sequential_ids(records: &[Record]) -> HashSet<i64> {
        records
            .iter()
            .map(|r| match r.get_field("id") {
                Some(FieldValue::Integer(n)) => *n,
                other => panic!("expected integer id, got {other:?}"),
            })
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_exact_count_across_workers() {
        let table = users_table();
        let refdata = Arc::new(ReferenceData::builtin());
        let mut factory = RecordFactory::start(
            table,
            refdata,
            1,
            40,
            FactoryOptions {
                workers: 4,
                queue_capacity: 8,
                ..FactoryOptions::default()
            },
        );

        let records = drain(&mut factory, 10).await;
        let failures = factory.stop().await;

        assert_eq!(records.len(), 40);
        assert!(failures.is_empty());

        // sequential ids form exactly {1..=40} regardless of worker count
        let ids = sequential_ids(&records);
        assert_eq!(ids, (1..=40).collect::<HashSet<i64>>());
    }

    #[tokio::test]
    async fn test_start_offset_is_honored() {
        let table = users_table();
        let refdata = Arc::new(ReferenceData::builtin());
        let mut factory =
            RecordFactory::start(table, refdata, 100, 5, FactoryOptions::default());

        let records = drain(&mut factory, 3).await;
        factory.stop().await;

        assert_eq!(sequential_ids(&records), (100..=104).collect::<HashSet<i64>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_per_record_failures_are_isolated() {
        // One weighted state has no city rows, so a share of address draws
        // fail; those records are reported, the rest still generate.
        let tables = ReferenceTables {
            names: vec![NameRecord {
                first: "Ada".into(),
                last: "Lovelace".into(),
                gender: "female".into(),
            }],
            streets: vec!["Main St".into()],
            cities: vec![("TX".into(), "Austin".into(), "78701".into())],
            state_weights: vec![("TX".into(), 0.5), ("XX".into(), 0.5)],
            area_codes: vec![("TX".into(), "512".into())],
            products: vec![ProductRecord {
                name: "Widget".into(),
                manufacturer: "Acme".into(),
                category: "Hardware".into(),
            }],
        };
        let refdata = Arc::new(ReferenceData::new(tables).unwrap());
        let table = users_table();

        let mut factory = RecordFactory::start(
            table,
            refdata,
            1,
            40,
            FactoryOptions {
                workers: 4,
                queue_capacity: 8,
                ..FactoryOptions::default()
            },
        );

        let records = drain(&mut factory, 10).await;
        let failures = factory.stop().await;

        // every ordinal is accounted for exactly once
        assert_eq!(records.len() + failures.len(), 40);
        assert!(!failures.is_empty(), "expected some reference-data failures");
        for failure in &failures {
            assert!(failure.ordinal.is_some());
            assert!(matches!(
                failure.error,
                GeneratorError::ReferenceData(_)
            ));
        }

        let mut seen = sequential_ids(&records);
        for failure in &failures {
            assert!(seen.insert(failure.ordinal.unwrap() as i64), "duplicate ordinal");
        }
        assert_eq!(seen, (1..=40).collect::<HashSet<i64>>());
    }

    #[tokio::test]
    async fn test_stop_unblocks_backpressured_workers() {
        let table = users_table();
        let refdata = Arc::new(ReferenceData::builtin());
        // tiny queue so workers are blocked on send when we stop
        let mut factory = RecordFactory::start(
            table,
            refdata,
            1,
            1_000,
            FactoryOptions {
                workers: 2,
                queue_capacity: 2,
                ..FactoryOptions::default()
            },
        );

        let batch = factory.collect(5).await;
        assert_eq!(batch.len(), 5);

        // must not hang even though workers still have records in flight
        factory.stop().await;
    }
}
