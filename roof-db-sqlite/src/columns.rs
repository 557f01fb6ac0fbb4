//! Column decoding helpers for the TEXT-based storage scheme.
//!
//! Money columns are stored as exact decimal strings and dates as
//! ISO-8601 (`YYYY-MM-DD`) strings, so every read goes through one of
//! these parsers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use roof_core::RepositoryError;

pub fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.parse::<Decimal>()
        .map_err(|e| RepositoryError::Database(format!("Failed to parse decimal '{}': {}", s, e)))
}

pub fn parse_optional_decimal(s: &Option<String>) -> Result<Option<Decimal>, RepositoryError> {
    s.as_ref().map(|s| parse_decimal(s)).transpose()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Database(format!("Failed to parse date '{}': {}", s, e)))
}

pub fn parse_optional_date(s: &Option<String>) -> Result<Option<NaiveDate>, RepositoryError> {
    s.as_ref().map(|s| parse_date(s)).transpose()
}

/// Pitch rise is stored as an INTEGER column; reject values outside u32.
pub fn parse_pitch(v: Option<i64>) -> Result<Option<u32>, RepositoryError> {
    v.map(|v| {
        u32::try_from(v)
            .map_err(|_| RepositoryError::Database(format!("Invalid roof pitch value: {}", v)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_plain_values() {
        assert_eq!(parse_decimal("22755.22"), Ok(dec!(22755.22)));
        assert_eq!(parse_decimal("-45.5"), Ok(dec!(-45.5)));
        assert_eq!(parse_decimal("0"), Ok(Decimal::ZERO));
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        assert!(matches!(
            parse_decimal("not a number"),
            Err(RepositoryError::Database(msg)) if msg.contains("not a number")
        ));
    }

    #[test]
    fn parse_optional_decimal_passes_none_through() {
        assert_eq!(parse_optional_decimal(&None), Ok(None));
        assert_eq!(
            parse_optional_decimal(&Some("12.5".to_string())),
            Ok(Some(dec!(12.5)))
        );
    }

    #[test]
    fn parse_date_accepts_iso_format() {
        let date = parse_date("2025-03-14").expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("03/14/2025").is_err());
    }

    #[test]
    fn parse_optional_date_passes_none_through() {
        assert_eq!(parse_optional_date(&None), Ok(None));
    }

    #[test]
    fn parse_pitch_bounds() {
        assert_eq!(parse_pitch(None).unwrap(), None);
        assert_eq!(parse_pitch(Some(8)).unwrap(), Some(8));
        assert!(parse_pitch(Some(-1)).is_err());
    }
}
