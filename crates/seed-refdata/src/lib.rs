//! Reference data provider for the surreal-seed generator.
//!
//! [`ReferenceData`] holds the immutable lookup tables behind realistic
//! field values: person names, street names, state-scoped city/zip records,
//! per-state telephone area codes, and product entries. It is constructed
//! once per run and shared read-only across all generation workers; every
//! lookup is a cheap random draw into preloaded tables.
//!
//! States are chosen through a cumulative-weight table so that populous
//! states come up more often, and city/zip/area-code lookups are scoped to
//! the chosen state so one record's address fields agree with each other.
//!
//! The crate ships an embedded dataset ([`ReferenceData::builtin`]); callers
//! can substitute their own tables through [`ReferenceData::new`], which is
//! also what tests fake.

mod dataset;

use std::collections::HashMap;

use rand::Rng;

/// Error type for reference data operations.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    /// A state-scoped lookup hit a state with no backing rows. Scoped to
    /// the one record being generated; generation continues.
    #[error("No reference data for state: {0}")]
    StateNotFound(String),

    /// A required table was empty at construction time.
    #[error("Reference table '{0}' is empty")]
    EmptyTable(&'static str),
}

/// A person name draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub first: String,
    pub last: String,
    pub gender: String,
}

impl NameRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    /// Email address derived from the name: lowercased `first.last` plus a
    /// numeric suffix and a fixed domain.
    pub fn email_address<R: Rng>(&self, rng: &mut R) -> String {
        format!(
            "{}.{}{}@example.com",
            self.first.to_lowercase(),
            self.last.to_lowercase(),
            rng.gen_range(1..=999)
        )
    }
}

/// A mailing address draw. City, state, and zip always come from the same
/// state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressRecord {
    pub fn street_address(&self) -> String {
        format!("{} {}", self.number, self.street)
    }
}

/// A product draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub manufacturer: String,
    pub category: String,
}

/// City/zip row scoped to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRecord {
    pub city: String,
    pub zip: String,
}

/// Raw input tables for building a [`ReferenceData`] instance.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub names: Vec<NameRecord>,
    pub streets: Vec<String>,
    /// (state, city, zip) rows; grouped by state at construction
    pub cities: Vec<(String, String, String)>,
    /// (state, relative weight) rows; cumulated at construction
    pub state_weights: Vec<(String, f64)>,
    /// (state, area code) rows; grouped by state at construction
    pub area_codes: Vec<(String, String)>,
    pub products: Vec<ProductRecord>,
}

/// Immutable reference data tables plus the weighted state selector.
#[derive(Debug)]
pub struct ReferenceData {
    names: Vec<NameRecord>,
    streets: Vec<String>,
    cities: HashMap<String, Vec<CityRecord>>,
    /// (state, cumulative weight), ascending; last entry carries the total
    cumulative_states: Vec<(String, f64)>,
    area_codes: HashMap<String, Vec<String>>,
    products: Vec<ProductRecord>,
}

impl ReferenceData {
    /// Build a provider from raw tables.
    ///
    /// Fails fast on empty core tables so draws never have to handle an
    /// empty pool.
    pub fn new(tables: ReferenceTables) -> Result<Self, ReferenceDataError> {
        if tables.names.is_empty() {
            return Err(ReferenceDataError::EmptyTable("names"));
        }
        if tables.streets.is_empty() {
            return Err(ReferenceDataError::EmptyTable("streets"));
        }
        if tables.state_weights.is_empty() {
            return Err(ReferenceDataError::EmptyTable("states"));
        }
        if tables.products.is_empty() {
            return Err(ReferenceDataError::EmptyTable("products"));
        }

        let mut cities: HashMap<String, Vec<CityRecord>> = HashMap::new();
        for (state, city, zip) in tables.cities {
            cities
                .entry(state)
                .or_default()
                .push(CityRecord { city, zip });
        }

        let mut area_codes: HashMap<String, Vec<String>> = HashMap::new();
        for (state, code) in tables.area_codes {
            area_codes.entry(state).or_default().push(code);
        }

        // Cumulative weight table: sort ascending by weight, then replace
        // each entry with the running total rounded to four decimals.
        let mut weights = tables.state_weights;
        weights.sort_by(|a, b| a.1.total_cmp(&b.1));
        let mut total = 0.0;
        let cumulative_states = weights
            .into_iter()
            .map(|(state, weight)| {
                total += weight;
                (state, (total * 10_000.0).round() / 10_000.0)
            })
            .collect();

        Ok(Self {
            names: tables.names,
            streets: tables.streets,
            cities,
            cumulative_states,
            area_codes,
            products: tables.products,
        })
    }

    /// Provider backed by the embedded dataset.
    pub fn builtin() -> Self {
        // The embedded tables are non-empty by construction.
        match Self::new(dataset::builtin_tables()) {
            Ok(data) => data,
            Err(_) => unreachable!("builtin dataset tables are non-empty"),
        }
    }

    /// Draw a name. First and last names are drawn independently so the
    /// combination space is much larger than the table.
    pub fn random_name<R: Rng>(&self, rng: &mut R) -> NameRecord {
        let first = &self.names[rng.gen_range(0..self.names.len())];
        let last = &self.names[rng.gen_range(0..self.names.len())];
        NameRecord {
            first: first.first.clone(),
            last: last.last.clone(),
            gender: first.gender.clone(),
        }
    }

    /// Draw an address: weighted state, state-scoped city/zip, pooled
    /// street, uniform house number.
    pub fn random_address<R: Rng>(&self, rng: &mut R) -> Result<AddressRecord, ReferenceDataError> {
        let state = self.weighted_state(rng).to_string();
        let rows = self
            .cities
            .get(&state)
            .filter(|rows| !rows.is_empty())
            .ok_or_else(|| ReferenceDataError::StateNotFound(state.clone()))?;
        let row = &rows[rng.gen_range(0..rows.len())];
        let street = &self.streets[rng.gen_range(0..self.streets.len())];
        let number = rng.gen_range(100..=99_999u32);

        Ok(AddressRecord {
            number: number.to_string(),
            street: street.clone(),
            city: row.city.clone(),
            state,
            zip: row.zip.clone(),
        })
    }

    /// Draw a product.
    pub fn random_product<R: Rng>(&self, rng: &mut R) -> ProductRecord {
        self.products[rng.gen_range(0..self.products.len())].clone()
    }

    /// Phone number with an area code drawn from the given state's pool:
    /// `<areaCode>-555-<4 digits>`.
    pub fn phone_for_state<R: Rng>(
        &self,
        rng: &mut R,
        state: &str,
    ) -> Result<String, ReferenceDataError> {
        let codes = self
            .area_codes
            .get(state)
            .filter(|codes| !codes.is_empty())
            .ok_or_else(|| ReferenceDataError::StateNotFound(state.to_string()))?;
        let code = &codes[rng.gen_range(0..codes.len())];
        let number = rng.gen_range(1..=9_999u32);
        Ok(format!("{code}-555-{number:04}"))
    }

    /// Pick a state from the cumulative weight table: draw uniformly in
    /// [0, total] and take the first entry whose running total covers it.
    fn weighted_state<R: Rng>(&self, rng: &mut R) -> &str {
        let total = self
            .cumulative_states
            .last()
            .map(|(_, w)| *w)
            .unwrap_or(0.0);
        let draw = rng.gen_range(0.0..=total);
        self.cumulative_states
            .iter()
            .find(|(_, cumulative)| *cumulative >= draw)
            .or_else(|| self.cumulative_states.last())
            .map(|(state, _)| state.as_str())
            .unwrap_or_default()
    }

    /// Number of distinct states in the weight table.
    pub fn state_count(&self) -> usize {
        self.cumulative_states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_tables() -> ReferenceTables {
        ReferenceTables {
            names: vec![
                NameRecord {
                    first: "Ada".into(),
                    last: "Lovelace".into(),
                    gender: "female".into(),
                },
                NameRecord {
                    first: "Alan".into(),
                    last: "Turing".into(),
                    gender: "male".into(),
                },
            ],
            streets: vec!["Main St".into(), "Oak Ave".into()],
            cities: vec![
                ("TX".into(), "Austin".into(), "78701".into()),
                ("TX".into(), "Dallas".into(), "75201".into()),
                ("VT".into(), "Montpelier".into(), "05601".into()),
            ],
            state_weights: vec![("TX".into(), 0.9), ("VT".into(), 0.1)],
            area_codes: vec![
                ("TX".into(), "512".into()),
                ("TX".into(), "214".into()),
                ("VT".into(), "802".into()),
            ],
            products: vec![ProductRecord {
                name: "Widget".into(),
                manufacturer: "Acme".into(),
                category: "Hardware".into(),
            }],
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let mut tables = small_tables();
        tables.names.clear();
        assert!(matches!(
            ReferenceData::new(tables),
            Err(ReferenceDataError::EmptyTable("names"))
        ));
    }

    #[test]
    fn test_address_fields_are_state_scoped() {
        let data = ReferenceData::new(small_tables()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let address = data.random_address(&mut rng).unwrap();
            match address.state.as_str() {
                "TX" => assert!(["Austin", "Dallas"].contains(&address.city.as_str())),
                "VT" => assert_eq!(address.city, "Montpelier"),
                other => panic!("unexpected state {other}"),
            }
        }
    }

    #[test]
    fn test_weighted_state_favors_heavy_states() {
        let data = ReferenceData::new(small_tables()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let texan = (0..1000)
            .filter(|_| data.random_address(&mut rng).unwrap().state == "TX")
            .count();
        // 90/10 weighting; allow generous slack
        assert!(texan > 700, "expected TX-heavy distribution, got {texan}/1000");
    }

    #[test]
    fn test_phone_format_and_state_pool() {
        let data = ReferenceData::new(small_tables()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let phone = data.phone_for_state(&mut rng, "TX").unwrap();
            let parts: Vec<&str> = phone.split('-').collect();
            assert_eq!(parts.len(), 3, "{phone}");
            assert!(["512", "214"].contains(&parts[0]), "{phone}");
            assert_eq!(parts[1], "555");
            assert_eq!(parts[2].len(), 4);
        }
    }

    #[test]
    fn test_unknown_state_is_not_found() {
        let data = ReferenceData::new(small_tables()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let err = data.phone_for_state(&mut rng, "ZZ").unwrap_err();
        assert!(matches!(err, ReferenceDataError::StateNotFound(s) if s == "ZZ"));
    }

    #[test]
    fn test_email_address_shape() {
        let name = NameRecord {
            first: "Ada".into(),
            last: "Lovelace".into(),
            gender: "female".into(),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let email = name.email_address(&mut rng);
        assert!(email.starts_with("ada.lovelace"), "{email}");
        assert!(email.ends_with("@example.com"), "{email}");
        // numeric suffix between the name and the domain
        let local = email.split('@').next().unwrap();
        assert!(local.trim_start_matches("ada.lovelace").parse::<u32>().is_ok());
    }

    #[test]
    fn test_builtin_dataset_loads() {
        let data = ReferenceData::builtin();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(data.state_count() > 5);
        let name = data.random_name(&mut rng);
        assert!(!name.first.is_empty() && !name.last.is_empty());

        let address = data.random_address(&mut rng).unwrap();
        assert!(!address.city.is_empty());
        assert!(data.phone_for_state(&mut rng, &address.state).is_ok());

        let product = data.random_product(&mut rng);
        assert!(!product.manufacturer.is_empty());
    }
}
