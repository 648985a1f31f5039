use fraction::Fraction;
use serde::{Deserialize, Deserializer};

use crate::{Error, Result};

pub fn zero() -> Fraction {
    Fraction::new(0u64, 1u64)
}

/// Parse an ingredient amount into an exact fraction
///
/// Supports formats:
/// - Whole numbers: "2" → 2/1
/// - Decimals: "0.5" → 1/2 (digit-exact, never through a float)
/// - Pure fractions: "1/2" → 1/2
/// - Mixed fractions: "1 1/2" → 3/2
///
/// Signs are rejected, amounts are never negative.
pub fn parse_amount(input: &str) -> Result<Fraction> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidAmount(input.to_owned());

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts.as_slice() {
        [whole, ratio] if ratio.contains('/') => {
            let whole = parse_digits(whole).ok_or_else(invalid)?;
            let ratio = parse_ratio(ratio).ok_or_else(invalid)?;
            Ok(Fraction::new(whole, 1u64) + ratio)
        }
        [ratio] if ratio.contains('/') => parse_ratio(ratio).ok_or_else(invalid),
        [decimal] => parse_decimal(decimal).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_digits(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    value.parse().ok()
}

fn parse_ratio(value: &str) -> Option<Fraction> {
    let (numerator, denominator) = value.split_once('/')?;
    let numerator = parse_digits(numerator)?;
    let denominator = parse_digits(denominator)?;

    if denominator == 0 {
        return None;
    }

    Some(Fraction::new(numerator, denominator))
}

fn parse_decimal(value: &str) -> Option<Fraction> {
    let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let numerator: u64 = format!("{int_part}{frac_part}").parse().ok()?;
    let denominator = 10u64.checked_pow(u32::try_from(frac_part.len()).ok()?)?;

    Some(Fraction::new(numerator, denominator))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Whole(u64),
    Decimal(f64),
    Text(String),
}

/// Serde adapter accepting `"1 1/2"`, `"0.25"`, `3` or `0.5`.
///
/// JSON floats go through their shortest round-trip representation, so
/// `0.1` stays exactly 1/10.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Fraction, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match RawAmount::deserialize(deserializer)? {
        RawAmount::Whole(value) => return Ok(Fraction::new(value, 1u64)),
        RawAmount::Decimal(value) => value.to_string(),
        RawAmount::Text(value) => value,
    };

    parse_amount(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(parse_amount("200").unwrap(), Fraction::new(200u64, 1u64));
        assert_eq!(parse_amount("  3 ").unwrap(), Fraction::new(3u64, 1u64));
    }

    #[test]
    fn test_parse_decimal_is_exact() {
        assert_eq!(parse_amount("0.5").unwrap(), Fraction::new(1u64, 2u64));
        assert_eq!(parse_amount("0.1").unwrap(), Fraction::new(1u64, 10u64));
        assert_eq!(parse_amount(".25").unwrap(), Fraction::new(1u64, 4u64));
        assert_eq!(parse_amount("5.").unwrap(), Fraction::new(5u64, 1u64));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_amount("1/2").unwrap(), Fraction::new(1u64, 2u64));
        assert_eq!(parse_amount("1 1/2").unwrap(), Fraction::new(3u64, 2u64));
        assert_eq!(parse_amount("4/8").unwrap(), Fraction::new(1u64, 2u64));
    }

    #[test]
    fn test_parse_rejects_negative_and_malformed() {
        for input in ["-2", "-0.5", "-1/2", "1/-2", "1/0", "", "abc", "1.2.3", "1 2", "+3"] {
            assert!(
                matches!(parse_amount(input), Err(Error::InvalidAmount(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_amount("99999999999999999999999").is_err());
        assert!(parse_amount("0.00000000000000000000001").is_err());
    }

    #[derive(Deserialize)]
    struct Line {
        #[serde(deserialize_with = "super::deserialize")]
        amount: Fraction,
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let parse = |json: &str| serde_json::from_str::<Line>(json).map(|l| l.amount);

        assert_eq!(parse(r#"{"amount": 3}"#).unwrap(), Fraction::new(3u64, 1u64));
        assert_eq!(parse(r#"{"amount": 0.1}"#).unwrap(), Fraction::new(1u64, 10u64));
        assert_eq!(parse(r#"{"amount": "1 1/2"}"#).unwrap(), Fraction::new(3u64, 2u64));
        assert!(parse(r#"{"amount": -1}"#).is_err());
    }
}
