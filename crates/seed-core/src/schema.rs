//! Wire-level schema definitions.
//!
//! A `SchemaCollection` is the payload callers submit to describe what to
//! generate: a named collection of tables, each with a target record count,
//! a key template, and an ordered column list. Field names on the wire are
//! camelCase (`keyFormat`, `primaryKey`) and the column type vocabulary is
//! closed; unrecognized type tags deserialize to `ColumnType::Unknown` and
//! are handled (non-fatally) at generation time.
//!
//! Wire types carry an untyped per-column options map. Use
//! [`SchemaCollection::validate`] to compile the wire form into the typed
//! [`crate::spec::CollectionSpec`] before generation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Error type for schema loading and validation.
///
/// Validation errors are fatal configuration errors: they are raised before
/// any generation starts and abort the whole run.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML (also covers JSON payloads, YAML being a superset)
    #[error("Failed to parse schema: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Table-level validation failure
    #[error("Table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// Column-level validation failure
    #[error("Table '{table}' column '{column}': {reason}")]
    InvalidColumn {
        table: String,
        column: String,
        reason: String,
    },
}

/// Closed vocabulary of generatable column types.
///
/// Tags match the wire spelling used by schema payloads. Anything outside
/// the vocabulary maps to `Unknown`, which generates a placeholder value
/// rather than failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    SequentialNumber,
    Text,
    Number,
    Boolean,
    Uuid,
    FirstName,
    LastName,
    FullName,
    Email,
    PhoneNumber,
    StreetAddress,
    City,
    State,
    Zipcode,
    CreditCard,
    AccountNumber,
    DollarAmount,
    ProductName,
    ProductType,
    Manufacturer,
    Date,
    Timestamp,
    IpAddress,
    MacAddress,
    Set,
    Unknown,
}

impl ColumnType {
    /// Map a wire tag to a column type; unrecognized tags are `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "sequentialNumber" => ColumnType::SequentialNumber,
            "text" => ColumnType::Text,
            "number" => ColumnType::Number,
            "boolean" => ColumnType::Boolean,
            "uuid" => ColumnType::Uuid,
            "firstName" => ColumnType::FirstName,
            "lastName" => ColumnType::LastName,
            "fullName" => ColumnType::FullName,
            "email" => ColumnType::Email,
            "phoneNumber" => ColumnType::PhoneNumber,
            "streetAddress" => ColumnType::StreetAddress,
            "city" => ColumnType::City,
            "state" => ColumnType::State,
            "zipcode" => ColumnType::Zipcode,
            "creditCard" => ColumnType::CreditCard,
            "accountNumber" => ColumnType::AccountNumber,
            "dollarAmount" => ColumnType::DollarAmount,
            "productName" => ColumnType::ProductName,
            "productType" => ColumnType::ProductType,
            "manufacturer" => ColumnType::Manufacturer,
            "date" => ColumnType::Date,
            "timestamp" => ColumnType::Timestamp,
            "ipAddress" => ColumnType::IpAddress,
            "macAddress" => ColumnType::MacAddress,
            "set" => ColumnType::Set,
            _ => ColumnType::Unknown,
        }
    }

    /// Wire spelling of this column type.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ColumnType::SequentialNumber => "sequentialNumber",
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Uuid => "uuid",
            ColumnType::FirstName => "firstName",
            ColumnType::LastName => "lastName",
            ColumnType::FullName => "fullName",
            ColumnType::Email => "email",
            ColumnType::PhoneNumber => "phoneNumber",
            ColumnType::StreetAddress => "streetAddress",
            ColumnType::City => "city",
            ColumnType::State => "state",
            ColumnType::Zipcode => "zipcode",
            ColumnType::CreditCard => "creditCard",
            ColumnType::AccountNumber => "accountNumber",
            ColumnType::DollarAmount => "dollarAmount",
            ColumnType::ProductName => "productName",
            ColumnType::ProductType => "productType",
            ColumnType::Manufacturer => "manufacturer",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
            ColumnType::IpAddress => "ipAddress",
            ColumnType::MacAddress => "macAddress",
            ColumnType::Set => "set",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl Serialize for ColumnType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ColumnType::from_tag(&tag))
    }
}

/// Single column on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Optional caller-assigned identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Column name; becomes the field name on every generated record
    pub name: String,

    /// Column type tag
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether this column is nullable
    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// Whether this column is the table's primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Untyped per-type options (e.g. digits, isDecimal, members).
    /// Validated and narrowed to a typed variant by schema validation.
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
}

fn default_nullable() -> bool {
    true
}

/// Table on the wire: how many records to generate, how to key them, and
/// the ordered column list every record follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    /// Optional caller-assigned identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Table name; also exposed to key templates as the `table` binding
    pub name: String,

    /// Target record count for a run
    pub count: u64,

    /// Key template rendered per record (e.g. `"{{table}}:{{id}}"`)
    pub key_format: String,

    /// Ordered column definitions
    pub columns: Vec<ColumnDefinition>,
}

/// Schema collection payload: the full description of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCollection {
    /// Optional caller-assigned identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Collection name
    pub name: String,

    /// Whether the target store is a NoSQL/keyed store
    #[serde(default)]
    pub nosql: bool,

    /// Ordered table definitions
    pub tables: Vec<TableDefinition>,
}

impl SchemaCollection {
    /// Load a schema collection from a YAML or JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a schema collection from a YAML or JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Get a table definition by name.
    pub fn get_table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Get all table names in the collection.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SCHEMA: &str = r#"
name: retail
nosql: true
tables:
  - name: users
    count: 100
    keyFormat: "{{table}}:{{id}}"
    columns:
      - name: id
        type: sequentialNumber
        primaryKey: true
      - name: name
        type: firstName
      - name: balance
        type: dollarAmount
        options:
          digits: 5
      - name: active
        type: boolean
"#;

    #[test]
    fn test_parse_schema_collection() {
        let schema = SchemaCollection::from_str(SAMPLE_SCHEMA).unwrap();

        assert_eq!(schema.name, "retail");
        assert!(schema.nosql);
        assert_eq!(schema.tables.len(), 1);

        let users = schema.get_table("users").unwrap();
        assert_eq!(users.count, 100);
        assert_eq!(users.key_format, "{{table}}:{{id}}");
        assert_eq!(users.columns.len(), 4);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let schema = SchemaCollection::from_str(SAMPLE_SCHEMA).unwrap();
        let users = schema.get_table("users").unwrap();

        let id = &users.columns[0];
        assert_eq!(id.column_type, ColumnType::SequentialNumber);
        assert!(id.primary_key);
        // nullable defaults to true on the wire
        assert!(id.nullable);

        let balance = &users.columns[2];
        assert_eq!(balance.column_type, ColumnType::DollarAmount);
        assert_eq!(balance.options.get("digits").and_then(|v| v.as_u64()), Some(5));
    }

    #[test]
    fn test_parse_json_payload() {
        let json = r#"{
          "name": "inventory",
          "nosql": true,
          "tables": [
            {
              "name": "products",
              "count": 10,
              "keyFormat": "{{uuid}}",
              "columns": [
                {"name": "sku", "type": "uuid"},
                {"name": "label", "type": "productName"}
              ]
            }
          ]
        }"#;

        let schema = SchemaCollection::from_str(json).unwrap();
        assert_eq!(schema.table_names(), vec!["products"]);
        assert_eq!(
            schema.tables[0].columns[1].column_type,
            ColumnType::ProductName
        );
    }

    #[test]
    fn test_unknown_type_tag_tolerated() {
        let yaml = r#"
name: odd
tables:
  - name: things
    count: 1
    keyFormat: "{{uuid}}"
    columns:
      - name: mystery
        type: quaternion
"#;
        let schema = SchemaCollection::from_str(yaml).unwrap();
        assert_eq!(
            schema.tables[0].columns[0].column_type,
            ColumnType::Unknown
        );
    }

    #[test]
    fn test_missing_table_returns_none() {
        let schema = SchemaCollection::from_str(SAMPLE_SCHEMA).unwrap();
        assert!(schema.get_table("nonexistent").is_none());
    }
}
