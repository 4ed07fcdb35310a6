//! Record assembly: one ordinal in, one complete record out.

use rand::Rng;
use uuid::Uuid;

use seed_core::{Field, Record, TableSpec};
use seed_refdata::ReferenceData;

use crate::fields::{generate_field, RecordSnapshot};
use crate::template::{TemplateContext, TemplateEngine};
use crate::GeneratorError;

/// Builds complete records for one table: reference snapshot, all fields in
/// column order, then the key render.
pub struct RecordGenerator<'a> {
    table: &'a TableSpec,
    refdata: &'a ReferenceData,
    engine: &'a TemplateEngine,
}

impl<'a> RecordGenerator<'a> {
    pub fn new(table: &'a TableSpec, refdata: &'a ReferenceData, engine: &'a TemplateEngine) -> Self {
        Self {
            table,
            refdata,
            engine,
        }
    }

    /// Generate the record for one ordinal.
    ///
    /// The key template runs after every field has been generated so that
    /// templates can reference any of the record's own values.
    pub fn generate<R: Rng>(&self, ordinal: u64, rng: &mut R) -> Result<Record, GeneratorError> {
        let snapshot = RecordSnapshot::draw(self.refdata, rng)?;

        let mut fields = Vec::with_capacity(self.table.columns.len());
        for column in &self.table.columns {
            fields.push(generate_field(column, ordinal, &snapshot, self.refdata, rng)?);
        }

        let key = self.render_key(ordinal, &fields);
        tracing::debug!(table = %self.table.name, ordinal, key = %key, "generated record");

        Ok(Record {
            key,
            ordinal,
            fields,
        })
    }

    /// Render the record key: synthetic `uuid` and `table` bindings plus
    /// every field's stringified value. Render errors are logged per record
    /// and the best-effort output is still used.
    fn render_key(&self, ordinal: u64, fields: &[Field]) -> String {
        let mut context = TemplateContext::new();
        context.insert("uuid", Uuid::new_v4().to_string());
        context.insert("table", self.table.name.clone());
        for field in fields {
            context.insert(field.name.clone(), field.value.to_display_string());
        }

        let result = self.engine.render(&self.table.key_format, &context);
        for error in &result.errors {
            tracing::warn!(
                table = %self.table.name,
                ordinal,
                %error,
                "key template render error"
            );
        }
        result.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_core::{FieldValue, SchemaCollection};

    fn table_spec(yaml: &str) -> std::sync::Arc<TableSpec> {
        SchemaCollection::from_str(yaml)
            .unwrap()
            .validate()
            .unwrap()
            .tables[0]
            .clone()
    }

    const SCHEMA: &str = r#"
name: s
tables:
  - name: users
    count: 5
    keyFormat: "{{table}}:{{id | zero_pad(6)}}"
    columns:
      - name: id
        type: sequentialNumber
        primaryKey: true
      - name: name
        type: firstName
      - name: active
        type: boolean
"#;

    #[test]
    fn test_key_uses_generated_fields() {
        let table = table_spec(SCHEMA);
        let refdata = ReferenceData::builtin();
        let engine = TemplateEngine::new();
        let generator = RecordGenerator::new(&table, &refdata, &engine);
        let mut rng = StdRng::seed_from_u64(21);

        let record = generator.generate(42, &mut rng).unwrap();
        assert_eq!(record.key, "users:000042");
        assert_eq!(record.ordinal, 42);
    }

    #[test]
    fn test_field_shape_is_stable() {
        let table = table_spec(SCHEMA);
        let refdata = ReferenceData::builtin();
        let engine = TemplateEngine::new();
        let generator = RecordGenerator::new(&table, &refdata, &engine);
        let mut rng = StdRng::seed_from_u64(21);

        let a = generator.generate(1, &mut rng).unwrap();
        let b = generator.generate(2, &mut rng).unwrap();

        assert_eq!(a.field_names(), vec!["id", "name", "active"]);
        assert_eq!(a.field_names(), b.field_names());
        assert!(matches!(a.get_field("id"), Some(FieldValue::Integer(1))));
        assert!(matches!(a.get_field("active"), Some(FieldValue::Bool(_))));
    }

    #[test]
    fn test_different_seeds_differ_in_values_not_shape() {
        let yaml = r#"
name: s
tables:
  - name: cards
    count: 1
    keyFormat: "{{table}}:{{id}}"
    columns:
      - name: id
        type: sequentialNumber
      - name: card
        type: creditCard
      - name: account
        type: accountNumber
"#;
        let table = table_spec(yaml);
        let refdata = ReferenceData::builtin();
        let engine = TemplateEngine::new();
        let generator = RecordGenerator::new(&table, &refdata, &engine);

        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let a = generator.generate(1, &mut rng_a).unwrap();
        let b = generator.generate(1, &mut rng_b).unwrap();

        // identical shape, identical sequential value
        assert_eq!(a.field_names(), b.field_names());
        assert_eq!(a.get_field("id"), b.get_field("id"));
        // random fields differ across seeds
        assert_ne!(a.get_field("card"), b.get_field("card"));
    }

    #[test]
    fn test_uuid_binding_differs_per_record() {
        let yaml = r#"
name: s
tables:
  - name: events
    count: 2
    keyFormat: "{{table}}:{{uuid}}"
    columns:
      - name: kind
        type: boolean
"#;
        let table = table_spec(yaml);
        let refdata = ReferenceData::builtin();
        let engine = TemplateEngine::new();
        let generator = RecordGenerator::new(&table, &refdata, &engine);
        let mut rng = StdRng::seed_from_u64(21);

        let a = generator.generate(1, &mut rng).unwrap();
        let b = generator.generate(2, &mut rng).unwrap();
        assert_ne!(a.key, b.key);
        assert!(a.key.starts_with("events:"));
    }

    #[test]
    fn test_render_error_still_produces_key() {
        let yaml = r#"
name: s
tables:
  - name: users
    count: 1
    keyFormat: "{{table}}:{{nope}}"
    columns:
      - name: id
        type: sequentialNumber
"#;
        let table = table_spec(yaml);
        let refdata = ReferenceData::builtin();
        let engine = TemplateEngine::new();
        let generator = RecordGenerator::new(&table, &refdata, &engine);
        let mut rng = StdRng::seed_from_u64(21);

        // unresolved binding renders empty, record still generated
        let record = generator.generate(1, &mut rng).unwrap();
        assert_eq!(record.key, "users:");
    }
}
