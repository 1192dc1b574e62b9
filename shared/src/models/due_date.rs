//! Due-date parsing shared by request bodies on both sides of the wire.
//!
//! Accepts RFC 3339 (`2025-03-01T09:30:00+02:00`), naive date-times read as UTC
//! (`2025-03-01T09:30:00`, `2025-03-01T09:30`) and plain dates read as midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

use super::validation_error::ValidationError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(ValidationError::new(format!("Invalid due date: '{input}'")))
}

/// `null` and absent both mean "no due date".
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_due_date(&raw).map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// For partial updates: absent → `None` (via `#[serde(default)]`), `null` → `Some(None)`.
pub fn deserialize_patch<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("2025-03-01T09:30:00Z", Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())]
    #[case("2025-03-01T11:30:00+02:00", Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())]
    #[case("2025-03-01T09:30:00", Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())]
    #[case("2025-03-01T09:30", Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())]
    #[case("2025-03-01", Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())]
    fn accepts_common_shapes(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_due_date(input).unwrap(), expected);
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("")]
    #[case("2025-13-01")]
    #[case("2025-02-30")]
    fn rejects_garbage(#[case] input: &str) {
        assert!(parse_due_date(input).is_err());
    }
}
