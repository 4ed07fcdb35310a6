//! Command-line interface for surreal-seed
//!
//! # Usage Examples
//!
//! ```bash
//! # Seed SurrealDB with every table in a schema collection
//! surreal-seed generate \
//!   --schema schemas/retail.yaml \
//!   --surreal-endpoint ws://localhost:8000 \
//!   --to-namespace test --to-database test
//!
//! # Flat-map layout, bigger batches, more generation workers
//! surreal-seed generate --schema schemas/retail.yaml \
//!   --mode flat --batch-size 500 --workers 16
//!
//! # Inspect generated output without touching the store
//! surreal-seed generate --schema schemas/retail.yaml --sample --sample-count 5
//!
//! # Check a schema file for configuration errors
//! surreal-seed validate --schema schemas/retail.yaml
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use seed_refdata::ReferenceData;
use seed_sink::{surreal_connect, MemorySink, SerializationMode, SurrealSink};
use surreal_seed::load::{self, LoadOptions};
use surreal_seed::SurrealOpts;

#[derive(Parser)]
#[command(name = "surreal-seed")]
#[command(about = "Generate schema-driven synthetic data and seed it into SurrealDB")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records for every table in a schema and write them to
    /// SurrealDB (or print samples with --sample)
    Generate {
        /// Schema collection file (YAML or JSON)
        #[arg(long, value_name = "PATH")]
        schema: PathBuf,

        /// First ordinal to generate
        #[arg(long, default_value = "1")]
        start: u64,

        /// Records per sink flush
        #[arg(long, default_value = "100")]
        batch_size: usize,

        /// Generation worker tasks per table
        #[arg(long, default_value = "8")]
        workers: usize,

        /// Bounded record queue capacity
        #[arg(long, default_value = "32")]
        queue_capacity: usize,

        /// How records are laid out under their keys
        #[arg(long, value_enum, default_value_t = Mode::Document)]
        mode: Mode,

        /// Generate in memory and print samples instead of writing
        #[arg(long)]
        sample: bool,

        /// Records per table in sample mode
        #[arg(long, default_value = "10")]
        sample_count: u64,

        /// Target SurrealDB namespace
        #[arg(long, default_value = "test")]
        to_namespace: String,

        /// Target SurrealDB database
        #[arg(long, default_value = "test")]
        to_database: String,

        /// Target SurrealDB options
        #[command(flatten)]
        surreal_opts: SurrealOpts,
    },

    /// Validate a schema collection file without generating anything
    Validate {
        /// Schema collection file (YAML or JSON)
        #[arg(long, value_name = "PATH")]
        schema: PathBuf,
    },
}

/// Serialization mode CLI values.
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Field-name -> stringified-value pairs
    Flat,
    /// One typed JSON document per record
    Document,
}

impl From<Mode> for SerializationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Flat => SerializationMode::FlatMap,
            Mode::Document => SerializationMode::Document,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            schema,
            start,
            batch_size,
            workers,
            queue_capacity,
            mode,
            sample,
            sample_count,
            to_namespace,
            to_database,
            surreal_opts,
        } => {
            let collection = seed_core::SchemaCollection::from_file(&schema)
                .with_context(|| format!("Failed to load schema file: {schema:?}"))?;
            // Fatal configuration errors abort here, before any generation.
            let spec = collection
                .validate()
                .context("Schema validation failed")?;

            tracing::info!(
                collection = %spec.name,
                tables = spec.tables.len(),
                nosql = spec.nosql,
                sample,
                "schema loaded"
            );

            let refdata = Arc::new(ReferenceData::builtin());
            let mut options = LoadOptions {
                start,
                batch_size,
                workers,
                queue_capacity,
                count_override: None,
            };

            let report = if sample {
                options.count_override = Some(sample_count);
                let sink = MemorySink::new(mode.into());
                let report = load::run(&spec, refdata, &sink, &options).await;

                let samples: Vec<serde_json::Value> = sink
                    .documents()
                    .into_iter()
                    .map(|(key, record)| serde_json::json!({ "key": key, "record": record }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&samples)?);
                report
            } else {
                let client = surreal_connect(&(&surreal_opts).into(), &to_namespace, &to_database)
                    .await
                    .context("Failed to connect to SurrealDB")?;
                let sink = SurrealSink::new(client, mode.into());
                let report = load::run(&spec, refdata, &sink, &options).await;
                println!("{}", serde_json::to_string_pretty(&report)?);
                report
            };

            if report.failure_count() > 0 {
                tracing::warn!(
                    failures = report.failure_count(),
                    delivered = report.delivered(),
                    "run finished with failures; see report for ordinals and keys"
                );
            }
            Ok(())
        }

        Commands::Validate { schema } => {
            let collection = seed_core::SchemaCollection::from_file(&schema)
                .with_context(|| format!("Failed to load schema file: {schema:?}"))?;
            let spec = collection
                .validate()
                .context("Schema validation failed")?;

            for table in &spec.tables {
                println!(
                    "table {} count {} columns {}",
                    table.name,
                    table.count,
                    table.columns.len()
                );
            }
            println!("Schema '{}' is valid", spec.name);
            Ok(())
        }
    }
}
