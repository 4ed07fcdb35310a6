//! Generated record model.
//!
//! A [`Record`] is one generated item: an external key plus ordered named
//! field values. Records are created once by the generation pipeline and
//! handed to a sink exactly once; the pipeline holds no further reference.

use chrono::{DateTime, NaiveDate, Utc};

/// Timestamp rendering used everywhere a date/time value is stringified.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
/// Calendar-date rendering.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One generated field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    StringArray(Vec<String>),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Stringified form, used by the flat-map sink mode and by key-template
    /// bindings.
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Integer(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Bool(v) => v.to_string(),
            FieldValue::String(v) => v.clone(),
            FieldValue::StringArray(items) => items.join(","),
            FieldValue::Date(v) => v.format(DATE_FORMAT).to_string(),
            FieldValue::DateTime(v) => v.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Typed JSON form, used by the document sink mode.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Integer(v) => serde_json::Value::from(*v),
            FieldValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(v) => serde_json::Value::from(*v),
            FieldValue::String(v) => serde_json::Value::from(v.clone()),
            FieldValue::StringArray(items) => serde_json::Value::from(items.clone()),
            FieldValue::Date(v) => serde_json::Value::from(v.format(DATE_FORMAT).to_string()),
            FieldValue::DateTime(v) => {
                serde_json::Value::from(v.format(TIMESTAMP_FORMAT).to_string())
            }
        }
    }
}

/// Named field of a generated record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One generated record: external key, ordinal, and ordered fields.
///
/// Field order always matches the table's column order, so every record of
/// a table has the identical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub ordinal: u64,
    pub fields: Vec<Field>,
}

impl Record {
    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_strings() {
        assert_eq!(FieldValue::Integer(42).to_display_string(), "42");
        assert_eq!(FieldValue::Float(12.5).to_display_string(), "12.5");
        assert_eq!(FieldValue::Bool(true).to_display_string(), "true");
        assert_eq!(
            FieldValue::StringArray(vec!["a".into(), "b".into()]).to_display_string(),
            "a,b"
        );

        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        assert_eq!(
            FieldValue::DateTime(ts).to_display_string(),
            "2024-03-05T09:30:00Z"
        );
        assert_eq!(
            FieldValue::Date(ts.date_naive()).to_display_string(),
            "2024-03-05"
        );
    }

    #[test]
    fn test_json_values_are_typed() {
        assert_eq!(FieldValue::Integer(7).to_json(), serde_json::json!(7));
        assert_eq!(FieldValue::Bool(false).to_json(), serde_json::json!(false));
        assert_eq!(
            FieldValue::StringArray(vec!["x".into()]).to_json(),
            serde_json::json!(["x"])
        );
    }

    #[test]
    fn test_record_field_lookup_preserves_order() {
        let record = Record {
            key: "users:1".into(),
            ordinal: 1,
            fields: vec![
                Field::new("id", FieldValue::Integer(1)),
                Field::new("name", FieldValue::String("Ada".into())),
            ],
        };

        assert_eq!(record.field_names(), vec!["id", "name"]);
        assert_eq!(record.get_field("id"), Some(&FieldValue::Integer(1)));
        assert!(record.get_field("missing").is_none());
    }
}
