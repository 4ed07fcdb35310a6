//! Run orchestration: drive the generation pipeline table by table and
//! flush batches into a sink.
//!
//! Per-record problems (reference-data misses, exhausted write retries) are
//! collected into the report and never abort a table; only schema
//! validation, which happens before this module is reached, aborts a run.
//! The report always carries delivered counts plus an explicit failure list
//! with enough context (ordinal, key, kind) to retry or investigate.

use std::sync::Arc;

use serde::Serialize;

use seed_core::{CollectionSpec, TableSpec};
use seed_generator::{FactoryOptions, RecordFactory};
use seed_refdata::ReferenceData;
use seed_sink::{BatchOutcome, RecordSink};

/// Options for one load run.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// First ordinal to generate
    pub start: u64,
    /// Records per sink flush
    pub batch_size: usize,
    /// Generation worker tasks per table
    pub workers: usize,
    /// Bounded record queue capacity
    pub queue_capacity: usize,
    /// Generate this many records per table instead of the schema counts
    /// (sample mode)
    pub count_override: Option<u64>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            start: 1,
            batch_size: 100,
            workers: 8,
            queue_capacity: 32,
            count_override: None,
        }
    }
}

/// What went wrong for one record (or, for stalls, a span of records).
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Generation,
    Delivery,
    Stalled,
}

/// One reportable failure.
#[derive(Debug, Serialize)]
pub struct LoadFailure {
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub message: String,
}

/// Delivery report for one table.
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub table: String,
    pub requested: u64,
    pub generated: u64,
    pub delivered: u64,
    pub failures: Vec<LoadFailure>,
}

/// Delivery report for a whole run.
#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub collection: String,
    pub tables: Vec<TableReport>,
}

impl LoadReport {
    pub fn delivered(&self) -> u64 {
        self.tables.iter().map(|t| t.delivered).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.tables.iter().map(|t| t.failures.len()).sum()
    }
}

/// Generate and deliver every table in the collection.
pub async fn run<S: RecordSink + ?Sized>(
    spec: &CollectionSpec,
    refdata: Arc<ReferenceData>,
    sink: &S,
    options: &LoadOptions,
) -> LoadReport {
    tracing::info!(collection = %spec.name, tables = spec.tables.len(), "load started");

    let mut report = LoadReport {
        collection: spec.name.clone(),
        tables: Vec::with_capacity(spec.tables.len()),
    };
    for table in &spec.tables {
        report
            .tables
            .push(run_table(Arc::clone(table), Arc::clone(&refdata), sink, options).await);
    }

    tracing::info!(
        collection = %spec.name,
        delivered = report.delivered(),
        failures = report.failure_count(),
        "load finished"
    );
    report
}

/// Generate and deliver one table: start the worker pool, drain it in
/// batch-sized chunks, write each batch, then join the pool and fold every
/// failure into the report.
pub async fn run_table<S: RecordSink + ?Sized>(
    table: Arc<TableSpec>,
    refdata: Arc<ReferenceData>,
    sink: &S,
    options: &LoadOptions,
) -> TableReport {
    let count = options.count_override.unwrap_or(table.count);
    tracing::info!(table = %table.name, start = options.start, count, "generating table");

    let mut factory = RecordFactory::start(
        Arc::clone(&table),
        refdata,
        options.start,
        count,
        FactoryOptions {
            workers: options.workers,
            queue_capacity: options.queue_capacity,
            ..FactoryOptions::default()
        },
    );

    let mut generated = 0u64;
    let mut outcome = BatchOutcome::default();
    while generated < count {
        let chunk = options.batch_size.min((count - generated) as usize);
        let batch = factory.collect(chunk).await;
        if batch.is_empty() {
            // workers finished early (per-record failures) or stalled
            break;
        }
        generated += batch.len() as u64;
        tracing::debug!(table = %table.name, records = batch.len(), "flushing batch");
        outcome.merge(sink.write_batch(&table.name, &batch).await);
    }

    let stalled = factory.is_stalled();
    let generation_failures = factory.stop().await;

    let mut failures: Vec<LoadFailure> = Vec::new();
    for failure in &generation_failures {
        failures.push(LoadFailure {
            kind: FailureKind::Generation,
            ordinal: failure.ordinal,
            key: None,
            message: failure.error.to_string(),
        });
    }
    for failure in outcome.failures {
        failures.push(LoadFailure {
            kind: FailureKind::Delivery,
            ordinal: Some(failure.ordinal),
            key: Some(failure.key),
            message: failure.error.to_string(),
        });
    }

    // Records neither generated nor individually reported: the pipeline
    // stalled before the target count was reached.
    let accounted = generated + generation_failures.len() as u64;
    if accounted < count {
        let missing = count - accounted;
        failures.push(LoadFailure {
            kind: FailureKind::Stalled,
            ordinal: None,
            key: None,
            message: format!(
                "pipeline stopped early ({}): {missing} of {count} records not generated",
                if stalled { "dequeue timeout" } else { "workers exited" }
            ),
        });
    }

    let delivered = outcome.delivered as u64;
    tracing::info!(
        table = %table.name,
        requested = count,
        generated,
        delivered,
        failures = failures.len(),
        "table done"
    );

    TableReport {
        table: table.name.clone(),
        requested: count,
        generated,
        delivered,
        failures,
    }
}
