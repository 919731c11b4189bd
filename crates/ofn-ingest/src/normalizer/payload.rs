//! Lenient readers over untyped JSON payloads
//!
//! Every helper is total: a missing field or a value of the wrong type yields
//! the default (`""`, `0.0`, `None`) instead of an error.

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

/// A JSON object
pub type Payload = Map<String, Value>;

/// Numeric timestamps at or below this many seconds are treated as garbage,
/// not as dates in 1970-2001.
pub const EPOCH_SECONDS_FLOOR: f64 = 1e9;

/// Nested object under `key`, if there is one.
pub fn child<'a>(payload: &'a Payload, key: &str) -> Option<&'a Payload> {
    payload.get(key).and_then(Value::as_object)
}

/// String value, or empty for anything that is not a JSON string.
pub fn as_string(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Number from a JSON number or a numeric string, `0.0` otherwise.
pub fn parse_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => number_to_f64(n),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn number_to_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(0.0)
}

/// Provider reference from a string or a number.
///
/// Integers keep all their digits. Any other number is written in its
/// shortest round-trip form, so distinct values never share a reference.
pub fn as_reference(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.to_string()
            }
        },
        _ => String::new(),
    }
}

/// Timestamp from an RFC3339 string or a Unix-seconds number.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Some(Value::Number(_)) => parse_epoch_seconds(value),
        _ => None,
    }
}

/// Timestamp from a Unix-seconds number only.
pub fn parse_epoch_seconds(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let seconds = value.and_then(Value::as_f64)?;
    if seconds <= EPOCH_SECONDS_FLOOR || !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp(seconds.trunc() as i64, 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_number(Some(&json!(12.5))), 12.5);
        assert_eq!(parse_number(Some(&json!(12345))), 12345.0);
        assert_eq!(parse_number(Some(&json!(-3))), -3.0);
        assert_eq!(parse_number(Some(&json!("123.45"))), 123.45);
    }

    #[test]
    fn test_parse_number_defaults_to_zero() {
        assert_eq!(parse_number(None), 0.0);
        assert_eq!(parse_number(Some(&Value::Null)), 0.0);
        assert_eq!(parse_number(Some(&json!(true))), 0.0);
        assert_eq!(parse_number(Some(&json!("twelve"))), 0.0);
        assert_eq!(parse_number(Some(&json!(" 12"))), 0.0);
        assert_eq!(parse_number(Some(&json!([1]))), 0.0);
    }

    #[test]
    fn test_as_string_only_takes_strings() {
        assert_eq!(as_string(Some(&json!("USD"))), "USD");
        assert_eq!(as_string(Some(&json!(840))), "");
        assert_eq!(as_string(None), "");
    }

    #[test]
    fn test_as_reference() {
        assert_eq!(as_reference(Some(&json!("sku-1"))), "sku-1");
        assert_eq!(as_reference(Some(&json!(999))), "999");
        assert_eq!(as_reference(Some(&json!(18446744073709551615u64))), "18446744073709551615");
        assert_eq!(as_reference(Some(&json!(999.7))), "999.7");
        assert_eq!(as_reference(Some(&json!(-4.2))), "-4.2");
        assert_eq!(as_reference(Some(&json!({"id": 1}))), "");
        assert_eq!(as_reference(None), "");
    }

    #[test]
    fn test_as_reference_keeps_numbers_apart() {
        let pairs = [
            (json!(1e20), json!(3e25)),
            (json!(999.1), json!(999.7)),
            (json!(1e19), json!(1.5e19)),
        ];
        for (a, b) in pairs {
            assert_ne!(as_reference(Some(&a)), as_reference(Some(&b)), "{a} vs {b}");
        }
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).single();
        assert_eq!(parse_timestamp(Some(&json!("2025-11-01T09:00:00Z"))), expected);
        assert_eq!(parse_timestamp(Some(&json!("2025-11-01T11:00:00+02:00"))), expected);
        assert_eq!(parse_timestamp(Some(&json!("2025-11-01 09:00"))), None);
    }

    #[test]
    fn test_parse_timestamp_epoch_seconds() {
        let expected = Utc.with_ymd_and_hms(2023, 10, 31, 17, 12, 25).single();
        assert_eq!(parse_timestamp(Some(&json!(1698772345))), expected);
        assert_eq!(parse_timestamp(Some(&json!(1698772345.9))), expected);
    }

    #[test]
    fn test_epoch_seconds_plausibility_floor() {
        assert_eq!(parse_timestamp(Some(&json!(999_999_999))), None);
        assert_eq!(parse_timestamp(Some(&json!(1_000_000_000))), None);
        assert_eq!(parse_timestamp(Some(&json!(42))), None);
        assert_eq!(parse_timestamp(Some(&json!(-1_700_000_000))), None);
        assert!(parse_timestamp(Some(&json!(1_000_000_001))).is_some());
    }

    #[test]
    fn test_epoch_seconds_ignores_strings() {
        assert_eq!(parse_epoch_seconds(Some(&json!("1698772345"))), None);
        assert!(parse_epoch_seconds(Some(&json!(1698772345))).is_some());
    }

    #[test]
    fn test_child() {
        let payload = json!({"pricing": {"amount": 1}, "times": 5});
        let payload = payload.as_object().unwrap();
        assert!(child(payload, "pricing").is_some());
        assert!(child(payload, "times").is_none());
        assert!(child(payload, "missing").is_none());
    }
}
