//! Value-level randomness helpers.
//!
//! Everything here is a pure function of the supplied RNG, which keeps the
//! callers deterministic under a seeded generator in tests.

use chrono::{DateTime, Duration, Months, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Issuer prefixes used for credit card numbers: Visa, Mastercard (51-54),
/// Discover.
const CARD_PREFIXES: &[&str] = &["4", "51", "52", "53", "54", "6011"];

/// Jitter bounds for offset dates, in seconds: one day to 180 days.
const DATE_JITTER_MIN_SECS: i64 = 86_400;
const DATE_JITTER_MAX_SECS: i64 = 15_552_000;

const LOREM: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
];
const TERMINATORS: &[&str] = &[".", "?", "!"];
const PUNCTUATION: &[&str] = &[";", ":", ","];

/// Round to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Uniform value in [10^(digits-1), 10^digits - 1], rounded to `places`
/// decimal places (0 places yields a whole number).
pub fn sized_number<R: Rng>(rng: &mut R, digits: u32, places: u32) -> f64 {
    let min = 10f64.powi(digits as i32 - 1);
    let max = 10f64.powi(digits as i32) - 1.0;
    round_to(min + (max - min) * rng.gen::<f64>(), places)
}

/// Zero-padded 12-digit account number drawn from [1e6, 1e8).
pub fn account_number<R: Rng>(rng: &mut R) -> String {
    format!("{:012}", rng.gen_range(1_000_000..100_000_000u64))
}

/// Luhn checksum helpers.
pub mod luhn {
    /// Compute the check digit that makes `digits` + check pass the Luhn
    /// checksum. `digits` must be ASCII digits.
    pub fn check_digit(digits: &str) -> u32 {
        let mut sum = 0;
        let mut double = true;
        for c in digits.chars().rev() {
            let mut n = c.to_digit(10).unwrap_or(0);
            if double {
                n *= 2;
                if n > 9 {
                    n -= 9;
                }
            }
            sum += n;
            double = !double;
        }
        (10 - sum % 10) % 10
    }

    /// Validate a full number against the Luhn checksum.
    pub fn is_valid(number: &str) -> bool {
        let mut sum = 0;
        let mut double = false;
        for c in number.chars().rev() {
            let mut n = match c.to_digit(10) {
                Some(n) => n,
                None => return false,
            };
            if double {
                n *= 2;
                if n > 9 {
                    n -= 9;
                }
            }
            sum += n;
            double = !double;
        }
        sum % 10 == 0
    }
}

/// 16-digit credit card number: realistic issuer prefix, random body, and a
/// computed Luhn check digit.
pub fn credit_card_number<R: Rng>(rng: &mut R) -> String {
    let prefix = CARD_PREFIXES[rng.gen_range(0..CARD_PREFIXES.len())];
    let mut number = String::with_capacity(16);
    number.push_str(prefix);
    while number.len() < 15 {
        number.push(char::from_digit(rng.gen_range(0..10), 10).unwrap_or('0'));
    }
    number.push(char::from_digit(luhn::check_digit(&number), 10).unwrap_or('0'));
    number
}

/// Colon-separated uppercase-hex MAC address from six random bytes.
pub fn mac_address<R: Rng>(rng: &mut R) -> String {
    let bytes: [u8; 6] = rng.gen();
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
    )
}

/// Private-range IPv4 address, equal probability across 10.0.0.0/8,
/// 172.16.0.0/12, and 192.168.0.0/16.
pub fn ip_address<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!(
            "10.{}.{}.{}",
            rng.gen_range(0..256),
            rng.gen_range(0..256),
            rng.gen_range(0..256)
        ),
        1 => format!(
            "172.{}.{}.{}",
            rng.gen_range(16..32),
            rng.gen_range(0..256),
            rng.gen_range(0..256)
        ),
        _ => format!("192.168.{}.{}", rng.gen_range(0..256), rng.gen_range(0..256)),
    }
}

/// Random date offset from now: 1..=|offset_years| whole years in the sign
/// of `offset_years`, plus 1-180 days of jitter.
pub fn offset_date<R: Rng>(rng: &mut R, offset_years: i32) -> DateTime<Utc> {
    let now = Utc::now();
    let delta_years = rng.gen_range(1..=offset_years.unsigned_abs().max(1));
    let months = Months::new(delta_years * 12);
    let shifted = if offset_years > 0 {
        now.checked_add_months(months)
    } else {
        now.checked_sub_months(months)
    }
    .unwrap_or(now);
    shifted + Duration::seconds(rng.gen_range(DATE_JITTER_MIN_SECS..=DATE_JITTER_MAX_SECS))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn lorem_segment<R: Rng>(rng: &mut R) -> String {
    let mut words = LOREM.to_vec();
    words.shuffle(rng);
    let limit = rng.gen_range(4..=words.len());
    words[..limit].join(" ")
}

fn lorem_sentence<R: Rng>(rng: &mut R) -> String {
    let terminator = TERMINATORS[rng.gen_range(0..TERMINATORS.len())];
    if rng.gen_bool(0.5) {
        format!("{}{}", capitalize_first(&lorem_segment(rng)), terminator)
    } else {
        let punctuation = PUNCTUATION[rng.gen_range(0..PUNCTUATION.len())];
        format!(
            "{}{} {}{}",
            capitalize_first(&lorem_segment(rng)),
            punctuation,
            lorem_segment(rng),
            terminator
        )
    }
}

/// Lorem-ipsum prose of at least `length` characters, built sentence by
/// sentence.
pub fn lorem_text<R: Rng>(rng: &mut R, length: usize) -> String {
    let opening_words = rng.gen_range(4..=LOREM.len());
    let terminator = TERMINATORS[rng.gen_range(0..TERMINATORS.len())];
    let mut text = format!(
        "{}{}",
        capitalize_first(&LOREM[..opening_words].join(" ")),
        terminator
    );
    while text.len() < length {
        text.push(' ');
        text.push_str(&lorem_sentence(rng));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sized_number_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let whole = sized_number(&mut rng, 3, 0);
            assert!((100.0..=999.0).contains(&whole), "{whole}");
            assert_eq!(whole.fract(), 0.0);

            let decimal = sized_number(&mut rng, 3, 3);
            assert!((100.0..=999.999).contains(&decimal), "{decimal}");
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.34567, 2), 12.35);
        assert_eq!(round_to(12.34467, 3), 12.345);
        assert_eq!(round_to(12.5, 0), 13.0);
    }

    #[test]
    fn test_credit_cards_pass_luhn() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let card = credit_card_number(&mut rng);
            assert_eq!(card.len(), 16);
            assert!(luhn::is_valid(&card), "{card}");
            assert!(
                CARD_PREFIXES.iter().any(|p| card.starts_with(p)),
                "{card}"
            );
        }
    }

    #[test]
    fn test_luhn_known_values() {
        // 7992739871 has check digit 3
        assert_eq!(luhn::check_digit("7992739871"), 3);
        assert!(luhn::is_valid("79927398713"));
        assert!(!luhn::is_valid("79927398710"));
        assert!(!luhn::is_valid("7992x398713"));
    }

    #[test]
    fn test_account_number_is_zero_padded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let account = account_number(&mut rng);
            assert_eq!(account.len(), 12);
            let n: u64 = account.parse().unwrap();
            assert!((1_000_000..100_000_000).contains(&n));
        }
    }

    #[test]
    fn test_ip_address_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let ip = ip_address(&mut rng);
            let octets: Vec<u32> = ip.split('.').map(|o| o.parse().unwrap()).collect();
            assert_eq!(octets.len(), 4);
            match octets[0] {
                10 => {}
                172 => assert!((16..32).contains(&octets[1]), "{ip}"),
                192 => assert_eq!(octets[1], 168, "{ip}"),
                other => panic!("unexpected first octet {other} in {ip}"),
            }
        }
    }

    #[test]
    fn test_mac_address_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let mac = mac_address(&mut rng);
        let parts: Vec<&str> = mac.split(':').collect();
        assert_eq!(parts.len(), 6);
        for part in parts {
            assert_eq!(part.len(), 2);
            assert!(u8::from_str_radix(part, 16).is_ok());
        }
    }

    #[test]
    fn test_offset_date_respects_sign() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();
        for _ in 0..100 {
            let past = offset_date(&mut rng, -2);
            // at least a year back, minus up to 180 days of forward jitter
            assert!(past < now);

            let future = offset_date(&mut rng, 5);
            assert!(future > now);
        }
    }

    #[test]
    fn test_lorem_text_reaches_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let text = lorem_text(&mut rng, 200);
        assert!(text.len() >= 200);
        assert!(text.chars().next().unwrap().is_uppercase());
    }
}
