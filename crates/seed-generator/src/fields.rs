//! Per-column field generation.
//!
//! [`generate_field`] is a pure function of the column spec, the record's
//! ordinal, a per-record reference snapshot, and the RNG. The snapshot is
//! drawn once per record and reused for every column, which is what keeps
//! name, email, and address fields of one record consistent with each other.

use rand::Rng;

use seed_core::{ColumnSpec, Field, FieldValue, GeneratorKind};
use seed_refdata::{AddressRecord, NameRecord, ProductRecord, ReferenceData, ReferenceDataError};

use crate::random;
use crate::GeneratorError;

/// One record's reference-data draw, shared across all of its columns.
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    pub name: NameRecord,
    pub address: AddressRecord,
    pub product: ProductRecord,
}

impl RecordSnapshot {
    /// Draw a fresh snapshot. A failed state-scoped lookup fails the whole
    /// record (and only that record).
    pub fn draw<R: Rng>(
        refdata: &ReferenceData,
        rng: &mut R,
    ) -> Result<Self, ReferenceDataError> {
        Ok(Self {
            name: refdata.random_name(rng),
            address: refdata.random_address(rng)?,
            product: refdata.random_product(rng),
        })
    }
}

/// Generate one typed field for a column.
pub fn generate_field<R: Rng>(
    column: &ColumnSpec,
    ordinal: u64,
    snapshot: &RecordSnapshot,
    refdata: &ReferenceData,
    rng: &mut R,
) -> Result<Field, GeneratorError> {
    let value = match &column.generator {
        GeneratorKind::SequentialNumber => FieldValue::Integer(ordinal as i64),
        GeneratorKind::FirstName => FieldValue::String(snapshot.name.first.clone()),
        GeneratorKind::LastName => FieldValue::String(snapshot.name.last.clone()),
        GeneratorKind::FullName => FieldValue::String(snapshot.name.full_name()),
        GeneratorKind::Email => FieldValue::String(snapshot.name.email_address(rng)),
        GeneratorKind::StreetAddress => FieldValue::String(snapshot.address.street_address()),
        GeneratorKind::City => FieldValue::String(snapshot.address.city.clone()),
        GeneratorKind::State => FieldValue::String(snapshot.address.state.clone()),
        GeneratorKind::Zipcode => FieldValue::String(snapshot.address.zip.clone()),
        GeneratorKind::Uuid => FieldValue::String(uuid::Uuid::new_v4().to_string()),
        GeneratorKind::CreditCard => FieldValue::String(random::credit_card_number(rng)),
        GeneratorKind::PhoneNumber => {
            FieldValue::String(refdata.phone_for_state(rng, &snapshot.address.state)?)
        }
        GeneratorKind::Boolean => FieldValue::Bool(rng.gen()),
        GeneratorKind::Number { digits, is_decimal } => {
            let places = if *is_decimal { *digits } else { 0 };
            let value = random::sized_number(rng, *digits, places);
            if *is_decimal {
                FieldValue::Float(value)
            } else {
                FieldValue::Integer(value as i64)
            }
        }
        GeneratorKind::DollarAmount { digits } => {
            FieldValue::Float(random::sized_number(rng, *digits, 2))
        }
        GeneratorKind::AccountNumber => FieldValue::String(random::account_number(rng)),
        GeneratorKind::Date { offset_years } => {
            FieldValue::Date(random::offset_date(rng, *offset_years).date_naive())
        }
        GeneratorKind::Timestamp { offset_years } => {
            FieldValue::DateTime(random::offset_date(rng, *offset_years))
        }
        GeneratorKind::Text { length } => FieldValue::String(random::lorem_text(rng, *length)),
        GeneratorKind::MacAddress => FieldValue::String(random::mac_address(rng)),
        GeneratorKind::IpAddress => FieldValue::String(random::ip_address(rng)),
        GeneratorKind::Set { members } => FieldValue::StringArray(members.clone()),
        GeneratorKind::ProductName => FieldValue::String(snapshot.product.name.clone()),
        GeneratorKind::Manufacturer => FieldValue::String(snapshot.product.manufacturer.clone()),
        GeneratorKind::ProductType => FieldValue::String(snapshot.product.category.clone()),
        GeneratorKind::Unknown => {
            tracing::warn!(column = %column.name, "unknown column type, emitting placeholder");
            FieldValue::String("unknown".to_string())
        }
    };

    Ok(Field::new(column.name.clone(), value))
}
