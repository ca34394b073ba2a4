//! Serde helper functions for request deserialization.
//!
//! Clients frequently send empty strings for fields they mean to leave unset;
//! these helpers treat blank values as `None`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional UTC timestamp, treating empty strings as None.
/// Accepts anything [`parse_datetime`] does.
pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_datetime(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Parses a timestamp as RFC 3339, falling back to a zone-less
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` read as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").map(|n| n.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_datetime")]
        datetime_field: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_optional_string_null_and_missing() {
        let result: TestStruct = serde_json::from_str(r#"{"string_field": null}"#).unwrap();
        assert_eq!(result.string_field, None);

        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_datetime_rfc3339() {
        let json = r#"{"datetime_field": "2025-01-15T09:30:00+02:00"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.datetime_field,
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 7, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_optional_datetime_zoneless_is_utc() {
        let json = r#"{"datetime_field": "2025-01-15T09:30:00"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.datetime_field,
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_optional_datetime_without_seconds() {
        let json = r#"{"datetime_field": "2025-01-15T09:30"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.datetime_field,
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_optional_datetime_empty() {
        let json = r#"{"datetime_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.datetime_field, None);
    }

    #[test]
    fn test_deserialize_optional_datetime_invalid() {
        let json = r#"{"datetime_field": "next tuesday"}"#;
        let result: Result<TestStruct, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
