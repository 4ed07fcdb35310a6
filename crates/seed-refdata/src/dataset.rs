//! Embedded default dataset.
//!
//! A compact, self-contained slice of US-flavored reference data compiled
//! into the crate so the generator works with no external data source.
//! Weights approximate relative state populations.

use crate::{NameRecord, ProductRecord, ReferenceTables};

const NAMES: &[(&str, &str, &str)] = &[
    ("James", "Smith", "male"),
    ("Mary", "Johnson", "female"),
    ("Robert", "Williams", "male"),
    ("Patricia", "Brown", "female"),
    ("John", "Jones", "male"),
    ("Jennifer", "Garcia", "female"),
    ("Michael", "Miller", "male"),
    ("Linda", "Davis", "female"),
    ("David", "Rodriguez", "male"),
    ("Elizabeth", "Martinez", "female"),
    ("William", "Hernandez", "male"),
    ("Barbara", "Lopez", "female"),
    ("Richard", "Gonzalez", "male"),
    ("Susan", "Wilson", "female"),
    ("Joseph", "Anderson", "male"),
    ("Jessica", "Thomas", "female"),
    ("Thomas", "Taylor", "male"),
    ("Sarah", "Moore", "female"),
    ("Christopher", "Jackson", "male"),
    ("Karen", "Martin", "female"),
    ("Charles", "Lee", "male"),
    ("Lisa", "Perez", "female"),
    ("Daniel", "Thompson", "male"),
    ("Nancy", "White", "female"),
    ("Matthew", "Harris", "male"),
    ("Sandra", "Sanchez", "female"),
    ("Anthony", "Clark", "male"),
    ("Ashley", "Ramirez", "female"),
    ("Mark", "Lewis", "male"),
    ("Emily", "Robinson", "female"),
    ("Steven", "Walker", "male"),
    ("Michelle", "Young", "female"),
    ("Andrew", "Allen", "male"),
    ("Amanda", "King", "female"),
    ("Paul", "Wright", "male"),
    ("Melissa", "Scott", "female"),
    ("Joshua", "Torres", "male"),
    ("Deborah", "Nguyen", "female"),
    ("Kevin", "Hill", "male"),
    ("Stephanie", "Flores", "female"),
];

const STREETS: &[&str] = &[
    "Main Street",
    "Oak Avenue",
    "Maple Drive",
    "Cedar Lane",
    "Park Avenue",
    "Washington Street",
    "Lake Shore Drive",
    "Second Street",
    "Elm Street",
    "Highland Avenue",
    "Sunset Boulevard",
    "River Road",
    "Church Street",
    "Walnut Street",
    "Jefferson Avenue",
    "Hillcrest Drive",
    "Franklin Street",
    "Ridge Road",
    "Meadow Lane",
    "Spring Street",
    "Chestnut Street",
    "Prospect Avenue",
    "Broadway",
    "Willow Court",
];

/// (state, city, zip)
const CITIES: &[(&str, &str, &str)] = &[
    ("CA", "Los Angeles", "90001"),
    ("CA", "San Diego", "92101"),
    ("CA", "San Jose", "95101"),
    ("CA", "Sacramento", "94203"),
    ("TX", "Houston", "77001"),
    ("TX", "Dallas", "75201"),
    ("TX", "Austin", "78701"),
    ("TX", "San Antonio", "78201"),
    ("FL", "Miami", "33101"),
    ("FL", "Orlando", "32801"),
    ("FL", "Tampa", "33601"),
    ("NY", "New York", "10001"),
    ("NY", "Buffalo", "14201"),
    ("NY", "Albany", "12201"),
    ("PA", "Philadelphia", "19101"),
    ("PA", "Pittsburgh", "15201"),
    ("IL", "Chicago", "60601"),
    ("IL", "Springfield", "62701"),
    ("OH", "Columbus", "43201"),
    ("OH", "Cleveland", "44101"),
    ("GA", "Atlanta", "30301"),
    ("GA", "Savannah", "31401"),
    ("NC", "Charlotte", "28201"),
    ("NC", "Raleigh", "27601"),
    ("MI", "Detroit", "48201"),
    ("MI", "Grand Rapids", "49501"),
    ("WA", "Seattle", "98101"),
    ("WA", "Spokane", "99201"),
    ("CO", "Denver", "80201"),
    ("CO", "Boulder", "80301"),
];

/// (state, relative weight)
const STATE_WEIGHTS: &[(&str, f64)] = &[
    ("CA", 0.1180),
    ("TX", 0.0900),
    ("FL", 0.0660),
    ("NY", 0.0590),
    ("PA", 0.0390),
    ("IL", 0.0380),
    ("OH", 0.0350),
    ("GA", 0.0320),
    ("NC", 0.0320),
    ("MI", 0.0300),
    ("WA", 0.0230),
    ("CO", 0.0170),
];

/// (state, area code)
const AREA_CODES: &[(&str, &str)] = &[
    ("CA", "213"),
    ("CA", "415"),
    ("CA", "619"),
    ("CA", "916"),
    ("TX", "214"),
    ("TX", "512"),
    ("TX", "713"),
    ("TX", "210"),
    ("FL", "305"),
    ("FL", "407"),
    ("FL", "813"),
    ("NY", "212"),
    ("NY", "716"),
    ("NY", "518"),
    ("PA", "215"),
    ("PA", "412"),
    ("IL", "312"),
    ("IL", "217"),
    ("OH", "614"),
    ("OH", "216"),
    ("GA", "404"),
    ("GA", "912"),
    ("NC", "704"),
    ("NC", "919"),
    ("MI", "313"),
    ("MI", "616"),
    ("WA", "206"),
    ("WA", "509"),
    ("CO", "303"),
    ("CO", "720"),
];

/// (name, manufacturer, category)
const PRODUCTS: &[(&str, &str, &str)] = &[
    ("Trailhead Daypack 28L", "Summit Gear", "Outdoor"),
    ("Cascade Insulated Bottle", "Summit Gear", "Outdoor"),
    ("Ridgeline Trekking Poles", "Summit Gear", "Outdoor"),
    ("AeroBook 14 Laptop", "Nexatech", "Electronics"),
    ("PulseBuds Wireless Earbuds", "Nexatech", "Electronics"),
    ("VoltHub USB-C Charger", "Nexatech", "Electronics"),
    ("Stoneware Mixing Bowl Set", "Hearth & Co", "Kitchen"),
    ("Precision Chef Knife 8in", "Hearth & Co", "Kitchen"),
    ("Cast Iron Skillet 12in", "Hearth & Co", "Kitchen"),
    ("Everyday Crew Sock 3-Pack", "Loomcraft", "Apparel"),
    ("Merino Quarter-Zip Pullover", "Loomcraft", "Apparel"),
    ("Stretch Canvas Work Pant", "Loomcraft", "Apparel"),
    ("Glide Ergonomic Office Chair", "Formline", "Furniture"),
    ("Slimline Standing Desk", "Formline", "Furniture"),
    ("Orbit LED Floor Lamp", "Formline", "Furniture"),
    ("Velocity Trail Running Shoe", "Stridewell", "Footwear"),
    ("Metro Slip-On Sneaker", "Stridewell", "Footwear"),
    ("HydroGrow Herb Garden Kit", "Verdella", "Garden"),
    ("ProCut Bypass Pruner", "Verdella", "Garden"),
    ("TerraPot Ceramic Planter", "Verdella", "Garden"),
];

/// Materialize the embedded dataset as owned tables.
pub(crate) fn builtin_tables() -> ReferenceTables {
    ReferenceTables {
        names: NAMES
            .iter()
            .map(|(first, last, gender)| NameRecord {
                first: (*first).into(),
                last: (*last).into(),
                gender: (*gender).into(),
            })
            .collect(),
        streets: STREETS.iter().map(|s| (*s).into()).collect(),
        cities: CITIES
            .iter()
            .map(|(state, city, zip)| ((*state).into(), (*city).into(), (*zip).into()))
            .collect(),
        state_weights: STATE_WEIGHTS
            .iter()
            .map(|(state, weight)| ((*state).into(), *weight))
            .collect(),
        area_codes: AREA_CODES
            .iter()
            .map(|(state, code)| ((*state).into(), (*code).into()))
            .collect(),
        products: PRODUCTS
            .iter()
            .map(|(name, manufacturer, category)| ProductRecord {
                name: (*name).into(),
                manufacturer: (*manufacturer).into(),
                category: (*category).into(),
            })
            .collect(),
    }
}
