//! Core types for the surreal-seed data generator.
//!
//! This crate defines the two halves of the generator's data model:
//!
//! - the **wire schema** (`schema` module): the `SchemaCollection` payload a
//!   caller submits, describing tables, columns, and key templates, and
//! - the **validated form** (`spec` module): the `CollectionSpec` produced by
//!   validation, where every column carries a typed generator variant with
//!   range-checked options and each table owns the shared ordinal counter
//!   workers allocate from.
//!
//! The `values` module holds the generated record model (`Record`, `Field`,
//! `FieldValue`) handed from the generation pipeline to a sink.

pub mod schema;
pub mod spec;
pub mod values;

// Re-exports for convenience
pub use schema::{ColumnDefinition, ColumnType, SchemaCollection, SchemaError, TableDefinition};
pub use spec::{CollectionSpec, ColumnSpec, GeneratorKind, TableSpec};
pub use values::{Field, FieldValue, Record, DATE_FORMAT, TIMESTAMP_FORMAT};
