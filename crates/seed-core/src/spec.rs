//! Validated schema form.
//!
//! Validation compiles the wire-level [`SchemaCollection`] into a
//! [`CollectionSpec`]: every column's untyped options map is narrowed to a
//! typed [`GeneratorKind`] variant carrying only the fields relevant to that
//! column type, with ranges checked up front. Anything malformed is a fatal
//! configuration error raised here, before generation starts.
//!
//! A [`TableSpec`] also owns the per-table ordinal counter. The counter is
//! the only state mutated by multiple generation workers; it is reset once
//! per run and advanced with an atomic fetch-and-increment, which is what
//! makes sequential-number values gap-free and unique regardless of worker
//! count or completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::schema::{ColumnDefinition, ColumnType, SchemaCollection, SchemaError, TableDefinition};

/// Default digit count for `number` columns.
const DEFAULT_NUMBER_DIGITS: u32 = 5;
/// Default digit count for `dollarAmount` columns.
const DEFAULT_DOLLAR_DIGITS: u32 = 4;
/// Default approximate character length for `text` columns.
const DEFAULT_TEXT_LENGTH: usize = 25;
/// Default year offset for `date` and `timestamp` columns (negative = past).
const DEFAULT_DATE_OFFSET_YEARS: i32 = -2;

/// Typed generator variant for one column, produced by validation.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorKind {
    SequentialNumber,
    FirstName,
    LastName,
    FullName,
    Email,
    StreetAddress,
    City,
    State,
    Zipcode,
    Uuid,
    CreditCard,
    PhoneNumber,
    Boolean,
    Number { digits: u32, is_decimal: bool },
    DollarAmount { digits: u32 },
    AccountNumber,
    Date { offset_years: i32 },
    Timestamp { offset_years: i32 },
    Text { length: usize },
    MacAddress,
    IpAddress,
    Set { members: Vec<String> },
    ProductName,
    Manufacturer,
    ProductType,
    Unknown,
}

/// Validated column: name plus the typed generator it dispatches to.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub generator: GeneratorKind,
}

/// Validated table, ready to drive a generation run.
///
/// Holds the shared ordinal counter workers allocate record positions from.
#[derive(Debug)]
pub struct TableSpec {
    pub name: String,
    pub count: u64,
    pub key_format: String,
    pub columns: Vec<ColumnSpec>,
    ordinal: AtomicU64,
}

impl TableSpec {
    /// Reset the ordinal counter to the run's start position.
    ///
    /// Called once per run, before any worker starts.
    pub fn reset_ordinal(&self, start: u64) {
        self.ordinal.store(start, Ordering::SeqCst);
    }

    /// Atomically claim the next ordinal.
    ///
    /// Returns the claimed position; callers must check it against the run's
    /// end bound themselves (claims past the end are simply abandoned).
    pub fn claim_ordinal(&self) -> u64 {
        self.ordinal.fetch_add(1, Ordering::SeqCst)
    }

    /// Field names in generation order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Validated schema collection.
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    pub name: String,
    pub nosql: bool,
    pub tables: Vec<Arc<TableSpec>>,
}

impl CollectionSpec {
    /// Get a validated table by name.
    pub fn get_table(&self, name: &str) -> Option<&Arc<TableSpec>> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl SchemaCollection {
    /// Validate the collection, narrowing untyped options to typed
    /// generator variants.
    ///
    /// Any malformed option, duplicate column name, or empty column list is
    /// a [`SchemaError`] and aborts before generation.
    pub fn validate(&self) -> Result<CollectionSpec, SchemaError> {
        let tables = self
            .tables
            .iter()
            .map(|t| validate_table(t).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CollectionSpec {
            name: self.name.clone(),
            nosql: self.nosql,
            tables,
        })
    }
}

fn validate_table(table: &TableDefinition) -> Result<TableSpec, SchemaError> {
    if table.name.is_empty() {
        return Err(SchemaError::InvalidTable {
            table: table.name.clone(),
            reason: "table name must not be empty".into(),
        });
    }
    if table.key_format.is_empty() {
        return Err(SchemaError::InvalidTable {
            table: table.name.clone(),
            reason: "keyFormat must not be empty".into(),
        });
    }
    if table.columns.is_empty() {
        return Err(SchemaError::InvalidTable {
            table: table.name.clone(),
            reason: "table must define at least one column".into(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for column in &table.columns {
        if !seen.insert(column.name.as_str()) {
            return Err(SchemaError::InvalidTable {
                table: table.name.clone(),
                reason: format!("duplicate column name '{}'", column.name),
            });
        }
    }

    let columns = table
        .columns
        .iter()
        .map(|c| validate_column(&table.name, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableSpec {
        name: table.name.clone(),
        count: table.count,
        key_format: table.key_format.clone(),
        columns,
        ordinal: AtomicU64::new(1),
    })
}

fn validate_column(table: &str, column: &ColumnDefinition) -> Result<ColumnSpec, SchemaError> {
    let opts = OptionReader {
        table,
        column: &column.name,
        options: &column.options,
    };

    let generator = match column.column_type {
        ColumnType::SequentialNumber => GeneratorKind::SequentialNumber,
        ColumnType::FirstName => GeneratorKind::FirstName,
        ColumnType::LastName => GeneratorKind::LastName,
        ColumnType::FullName => GeneratorKind::FullName,
        ColumnType::Email => GeneratorKind::Email,
        ColumnType::StreetAddress => GeneratorKind::StreetAddress,
        ColumnType::City => GeneratorKind::City,
        ColumnType::State => GeneratorKind::State,
        ColumnType::Zipcode => GeneratorKind::Zipcode,
        ColumnType::Uuid => GeneratorKind::Uuid,
        ColumnType::CreditCard => GeneratorKind::CreditCard,
        ColumnType::PhoneNumber => GeneratorKind::PhoneNumber,
        ColumnType::Boolean => GeneratorKind::Boolean,
        ColumnType::Number => GeneratorKind::Number {
            digits: opts.digits(DEFAULT_NUMBER_DIGITS)?,
            is_decimal: opts.bool("isDecimal", false)?,
        },
        ColumnType::DollarAmount => GeneratorKind::DollarAmount {
            digits: opts.digits(DEFAULT_DOLLAR_DIGITS)?,
        },
        ColumnType::AccountNumber => GeneratorKind::AccountNumber,
        ColumnType::Date => GeneratorKind::Date {
            offset_years: opts.offset_years()?,
        },
        ColumnType::Timestamp => GeneratorKind::Timestamp {
            offset_years: opts.offset_years()?,
        },
        ColumnType::Text => GeneratorKind::Text {
            length: opts.length()?,
        },
        ColumnType::MacAddress => GeneratorKind::MacAddress,
        ColumnType::IpAddress => GeneratorKind::IpAddress,
        ColumnType::Set => GeneratorKind::Set {
            members: opts.members()?,
        },
        ColumnType::ProductName => GeneratorKind::ProductName,
        ColumnType::Manufacturer => GeneratorKind::Manufacturer,
        ColumnType::ProductType => GeneratorKind::ProductType,
        ColumnType::Unknown => GeneratorKind::Unknown,
    };

    Ok(ColumnSpec {
        name: column.name.clone(),
        nullable: column.nullable,
        primary_key: column.primary_key,
        generator,
    })
}

/// Helper for pulling typed, range-checked values out of the wire options
/// map, with column-scoped errors.
struct OptionReader<'a> {
    table: &'a str,
    column: &'a str,
    options: &'a std::collections::HashMap<String, serde_json::Value>,
}

impl OptionReader<'_> {
    fn invalid(&self, reason: String) -> SchemaError {
        SchemaError::InvalidColumn {
            table: self.table.to_string(),
            column: self.column.to_string(),
            reason,
        }
    }

    fn integer(&self, key: &str) -> Result<Option<i64>, SchemaError> {
        match self.options.get(key) {
            None => Ok(None),
            Some(value) => {
                // Accept numeric strings as well; JSON payloads from form
                // frontends quote everything.
                let parsed = value
                    .as_i64()
                    .or_else(|| value.as_str().and_then(|s| s.parse().ok()));
                parsed.map(Some).ok_or_else(|| {
                    self.invalid(format!("option '{key}' must be an integer, got {value}"))
                })
            }
        }
    }

    fn digits(&self, default: u32) -> Result<u32, SchemaError> {
        match self.integer("digits")? {
            None => Ok(default),
            Some(d) if (1..=15).contains(&d) => Ok(d as u32),
            Some(d) => Err(self.invalid(format!("option 'digits' must be in 1..=15, got {d}"))),
        }
    }

    fn length(&self) -> Result<usize, SchemaError> {
        match self.integer("length")? {
            None => Ok(DEFAULT_TEXT_LENGTH),
            Some(l) if (1..=100_000).contains(&l) => Ok(l as usize),
            Some(l) => {
                Err(self.invalid(format!("option 'length' must be in 1..=100000, got {l}")))
            }
        }
    }

    fn offset_years(&self) -> Result<i32, SchemaError> {
        match self.integer("offsetYears")? {
            None => Ok(DEFAULT_DATE_OFFSET_YEARS),
            Some(0) => Err(self.invalid("option 'offsetYears' must be non-zero".into())),
            Some(o) if (-100..=100).contains(&o) => Ok(o as i32),
            Some(o) => {
                Err(self.invalid(format!("option 'offsetYears' must be in -100..=100, got {o}")))
            }
        }
    }

    fn bool(&self, key: &str, default: bool) -> Result<bool, SchemaError> {
        match self.options.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
                .ok_or_else(|| {
                    self.invalid(format!("option '{key}' must be a boolean, got {value}"))
                }),
        }
    }

    fn members(&self) -> Result<Vec<String>, SchemaError> {
        match self.options.get("members") {
            None => Ok(vec!["one".into(), "two".into(), "three".into()]),
            Some(serde_json::Value::Array(items)) if !items.is_empty() => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        self.invalid(format!("option 'members' must contain strings, got {item}"))
                    })
                })
                .collect(),
            Some(serde_json::Value::Array(_)) => {
                Err(self.invalid("option 'members' must not be empty".into()))
            }
            Some(other) => {
                Err(self.invalid(format!("option 'members' must be an array, got {other}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(yaml: &str) -> SchemaCollection {
        SchemaCollection::from_str(yaml).unwrap()
    }

    const VALID: &str = r#"
name: retail
tables:
  - name: accounts
    count: 50
    keyFormat: "{{table}}:{{id | zero_pad(8)}}"
    columns:
      - name: id
        type: sequentialNumber
        primaryKey: true
      - name: balance
        type: number
        options:
          digits: 3
          isDecimal: true
      - name: tier
        type: set
        options:
          members: ["bronze", "silver", "gold"]
      - name: opened
        type: date
"#;

    #[test]
    fn test_validate_narrows_options() {
        let spec = collection(VALID).validate().unwrap();
        let accounts = spec.get_table("accounts").unwrap();

        assert_eq!(accounts.count, 50);
        assert_eq!(
            accounts.columns[1].generator,
            GeneratorKind::Number {
                digits: 3,
                is_decimal: true
            }
        );
        assert_eq!(
            accounts.columns[2].generator,
            GeneratorKind::Set {
                members: vec!["bronze".into(), "silver".into(), "gold".into()]
            }
        );
        assert_eq!(
            accounts.columns[3].generator,
            GeneratorKind::Date { offset_years: -2 }
        );
    }

    #[test]
    fn test_defaults_applied() {
        let yaml = r#"
name: s
tables:
  - name: t
    count: 1
    keyFormat: "{{uuid}}"
    columns:
      - name: n
        type: number
      - name: d
        type: dollarAmount
      - name: blurb
        type: text
      - name: tags
        type: set
"#;
        let spec = collection(yaml).validate().unwrap();
        let t = spec.get_table("t").unwrap();
        assert_eq!(
            t.columns[0].generator,
            GeneratorKind::Number {
                digits: 5,
                is_decimal: false
            }
        );
        assert_eq!(t.columns[1].generator, GeneratorKind::DollarAmount { digits: 4 });
        assert_eq!(t.columns[2].generator, GeneratorKind::Text { length: 25 });
        assert_eq!(
            t.columns[3].generator,
            GeneratorKind::Set {
                members: vec!["one".into(), "two".into(), "three".into()]
            }
        );
    }

    #[test]
    fn test_bad_digits_rejected() {
        let yaml = r#"
name: s
tables:
  - name: t
    count: 1
    keyFormat: "{{uuid}}"
    columns:
      - name: n
        type: number
        options:
          digits: 99
"#;
        let err = collection(yaml).validate().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidColumn { .. }), "{err}");
    }

    #[test]
    fn test_non_integer_digits_rejected() {
        let yaml = r#"
name: s
tables:
  - name: t
    count: 1
    keyFormat: "{{uuid}}"
    columns:
      - name: n
        type: number
        options:
          digits: lots
"#;
        assert!(collection(yaml).validate().is_err());
    }

    #[test]
    fn test_empty_members_rejected() {
        let yaml = r#"
name: s
tables:
  - name: t
    count: 1
    keyFormat: "{{uuid}}"
    columns:
      - name: tags
        type: set
        options:
          members: []
"#;
        assert!(collection(yaml).validate().is_err());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let yaml = r#"
name: s
tables:
  - name: t
    count: 1
    keyFormat: "{{uuid}}"
    columns:
      - name: x
        type: boolean
      - name: x
        type: uuid
"#;
        let err = collection(yaml).validate().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTable { .. }), "{err}");
    }

    #[test]
    fn test_empty_key_format_rejected() {
        let yaml = r#"
name: s
tables:
  - name: t
    count: 1
    keyFormat: ""
    columns:
      - name: x
        type: boolean
"#;
        assert!(collection(yaml).validate().is_err());
    }

    #[test]
    fn test_ordinal_counter_claims_are_sequential() {
        let spec = collection(VALID).validate().unwrap();
        let table = spec.get_table("accounts").unwrap();

        table.reset_ordinal(10);
        assert_eq!(table.claim_ordinal(), 10);
        assert_eq!(table.claim_ordinal(), 11);
        assert_eq!(table.claim_ordinal(), 12);

        table.reset_ordinal(1);
        assert_eq!(table.claim_ordinal(), 1);
    }
}
