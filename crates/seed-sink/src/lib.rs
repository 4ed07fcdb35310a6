//! Batch write sinks for surreal-seed.
//!
//! The [`RecordSink`] trait abstracts the target store: a sink accepts a
//! batch of generated records and reports how many were delivered along
//! with per-record failures. Implementations here:
//!
//! - [`SurrealSink`] — writes each record to SurrealDB with
//!   `UPSERT <record-id> CONTENT ...` (idempotent overwrite-by-key),
//!   fanning writes out concurrently within a batch and retrying transient
//!   store errors with exponential backoff.
//! - [`MemorySink`] — records documents in memory; backs sample mode and
//!   tests.
//!
//! Serialization is selected per run: **flat-map** mode stringifies every
//! field value, **document** mode writes a typed JSON document. Both carry
//! the same values, differing only in envelope.

pub mod connect;
pub mod memory;
pub mod retry;
pub mod serialize;
pub mod surreal;
pub mod traits;

// Re-exports for convenience
pub use connect::{surreal_connect, ConnectOpts};
pub use memory::MemorySink;
pub use retry::{with_retry, RetryPolicy};
pub use serialize::{document, flat_map, SerializationMode};
pub use surreal::SurrealSink;
pub use traits::{BatchOutcome, RecordSink, SinkError, WriteFailure};
