//! Record generation pipeline for surreal-seed.
//!
//! This crate turns a validated [`seed_core::TableSpec`] into a stream of
//! generated records:
//!
//! ```text
//! TableSpec ──┐
//!             ▼
//!   ┌──────────────────┐   claim ordinal (atomic)
//!   │  RecordFactory   │──────────────────────────┐
//!   │  (worker pool)   │                          ▼
//!   └────────┬─────────┘   RecordGenerator: snapshot → fields → key
//!            │ bounded queue (backpressure)
//!            ▼
//!      collect(batch) ──► batches for the sink
//! ```
//!
//! - `random` — value-level randomness: sized numbers, Luhn credit cards,
//!   offset dates, lorem text, network addresses.
//! - `fields` — per-column dispatch from [`seed_core::GeneratorKind`] to a
//!   typed field value, fed by a per-record reference-data snapshot.
//! - `template` — the key-template renderer with its filter registry.
//! - `record` — assembles one record per ordinal.
//! - `factory` — the bounded worker pool and draining driver.

pub mod factory;
pub mod fields;
pub mod random;
pub mod record;
pub mod template;

use seed_refdata::ReferenceDataError;

// Re-exports for convenience
pub use factory::{FactoryOptions, GenerationFailure, RecordFactory};
pub use fields::{generate_field, RecordSnapshot};
pub use record::RecordGenerator;
pub use template::{RenderResult, TemplateContext, TemplateEngine, TemplateError, TemplateFilter};

/// Error type for record generation.
///
/// Per-record errors are isolated: the pipeline reports them on a dedicated
/// channel and keeps generating the remaining records.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A reference-data lookup failed for this record
    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),

    /// A worker task died (panic or cancellation)
    #[error("Worker task failed: {0}")]
    Worker(String),

    /// The driver timed out waiting on the record queue
    #[error("Timed out waiting for records from the worker pool")]
    Stalled,
}
