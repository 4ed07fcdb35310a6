//! surreal-seed library
//!
//! Generates schema-conforming synthetic records and streams them, with
//! bounded memory and retrying delivery, into SurrealDB. The heavy lifting
//! lives in the workspace crates:
//!
//! - `seed-core` — schema model, validation, record value types
//! - `seed-refdata` — reference data provider (names, addresses, products)
//! - `seed-generator` — field generation, key templates, the worker-pool
//!   pipeline
//! - `seed-sink` — batch sinks with per-record retry/backoff
//!
//! This crate ties them together: the [`load`] module drives the pipeline
//! table by table and aggregates a delivery report, and the binary wraps it
//! in a CLI.
//!
//! # CLI Usage
//!
//! ```bash
//! # Seed a SurrealDB instance from a schema file
//! surreal-seed generate --schema retail.yaml \
//!   --surreal-endpoint ws://localhost:8000 \
//!   --to-namespace test --to-database test
//!
//! # Flat-map layout (every field stringified) instead of JSON documents
//! surreal-seed generate --schema retail.yaml --mode flat
//!
//! # Print ten in-memory samples per table, writing nothing
//! surreal-seed generate --schema retail.yaml --sample
//!
//! # Validate a schema without generating
//! surreal-seed validate --schema retail.yaml
//! ```

use clap::Parser;

pub mod load;

// Re-exports for convenience
pub use seed_core::{CollectionSpec, SchemaCollection, SchemaError};
pub use seed_refdata::ReferenceData;
pub use seed_sink::{MemorySink, RecordSink, SerializationMode, SurrealSink};

#[derive(Parser, Clone)]
pub struct SurrealOpts {
    /// SurrealDB endpoint URL
    #[arg(
        long,
        default_value = "http://localhost:8000",
        env = "SURREAL_ENDPOINT"
    )]
    pub surreal_endpoint: String,

    /// SurrealDB username
    #[arg(long, default_value = "root", env = "SURREAL_USERNAME")]
    pub surreal_username: String,

    /// SurrealDB password
    #[arg(long, default_value = "root", env = "SURREAL_PASSWORD")]
    pub surreal_password: String,
}

impl From<&SurrealOpts> for seed_sink::ConnectOpts {
    fn from(opts: &SurrealOpts) -> Self {
        Self {
            endpoint: opts.surreal_endpoint.clone(),
            username: opts.surreal_username.clone(),
            password: opts.surreal_password.clone(),
        }
    }
}
