//! Coercion rules from loosely-typed JSON values to Rust types.
//!
//! Every function returns `None` when the value cannot be converted; the
//! caller decides whether that is an absent result or a strict-mode error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const TRUE_WORDS: [&str; 3] = ["true", "1", "yes"];
const FALSE_WORDS: [&str; 3] = ["false", "0", "no"];

/// Render a scalar as text. Arrays and objects are not scalars.
///
/// Numbers use serde_json's locale-independent formatting and booleans
/// render as `true` / `false`.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Render any non-null value as text, nested structures as compact JSON.
pub(crate) fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        scalar => scalar_string(scalar),
    }
}

pub(crate) fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if n.is_u64() {
                // Above i64::MAX
                None
            } else {
                n.as_f64().and_then(truncate)
            }
        }
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

pub(crate) fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Boolean coercion: native booleans, then the word lists, then integer
/// truthiness.
pub(crate) fn to_bool(value: &Value) -> Option<bool> {
    if let Value::Bool(b) = value {
        return Some(*b);
    }

    if let Value::String(s) = value {
        let word = s.trim().to_lowercase();
        if TRUE_WORDS.contains(&word.as_str()) {
            return Some(true);
        }
        if FALSE_WORDS.contains(&word.as_str()) {
            return Some(false);
        }
    }

    to_int(value).map(|i| i != 0)
}

/// Numbers are epoch seconds, strings are ISO-8601.
pub(crate) fn to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0)
            } else {
                n.as_f64().and_then(from_fractional_seconds)
            }
        }
        Value::String(s) => parse_iso8601(s),
        _ => None,
    }
}

fn from_fractional_seconds(f: f64) -> Option<DateTime<Utc>> {
    if !f.is_finite() {
        return None;
    }
    let secs = f.floor();
    let nanos = ((f - secs) * 1e9).round().min(999_999_999.0) as u32;
    let secs = truncate(secs)?;
    DateTime::from_timestamp(secs, nanos)
}

fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // Without an offset the value is taken as UTC
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};
    use serde_json::json;

    #[test]
    fn scalar_string_formats() {
        assert_eq!(scalar_string(&json!("a b")).as_deref(), Some("a b"));
        assert_eq!(scalar_string(&json!(18)).as_deref(), Some("18"));
        assert_eq!(scalar_string(&json!(-2.5)).as_deref(), Some("-2.5"));
        assert_eq!(scalar_string(&json!(true)).as_deref(), Some("true"));
        assert_eq!(scalar_string(&json!(null)), None);
        assert_eq!(scalar_string(&json!([1])), None);
    }

    #[test]
    fn display_string_renders_nested_as_json() {
        assert_eq!(display_string(&json!([1, 2])).as_deref(), Some("[1,2]"));
        assert_eq!(display_string(&json!({"a": 1})).as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(display_string(&json!(null)), None);
    }

    #[test]
    fn int_coercion() {
        assert_eq!(to_int(&json!(42)), Some(42));
        assert_eq!(to_int(&json!(3.9)), Some(3));
        assert_eq!(to_int(&json!(-3.9)), Some(-3));
        assert_eq!(to_int(&json!(true)), Some(1));
        assert_eq!(to_int(&json!(" 17 ")), Some(17));
        assert_eq!(to_int(&json!("+5")), Some(5));
        assert_eq!(to_int(&json!("4.2")), None);
        assert_eq!(to_int(&json!("abc")), None);
        assert_eq!(to_int(&json!(u64::MAX)), None);
        assert_eq!(to_int(&json!(1e300)), None);
        assert_eq!(to_int(&json!({"n": 1})), None);
    }

    #[test]
    fn float_coercion() {
        assert_eq!(to_float(&json!(2)), Some(2.0));
        assert_eq!(to_float(&json!(2.25)), Some(2.25));
        assert_eq!(to_float(&json!("1e3")), Some(1000.0));
        assert_eq!(to_float(&json!(false)), Some(0.0));
        assert_eq!(to_float(&json!("ten")), None);
        assert_eq!(to_float(&json!([1.0])), None);
    }

    #[test]
    fn bool_words_are_case_insensitive() {
        assert_eq!(to_bool(&json!("YES")), Some(true));
        assert_eq!(to_bool(&json!(" True ")), Some(true));
        assert_eq!(to_bool(&json!("No")), Some(false));
        assert_eq!(to_bool(&json!("0")), Some(false));
    }

    #[test]
    fn bool_falls_back_to_integer_truthiness() {
        assert_eq!(to_bool(&json!(2)), Some(true));
        assert_eq!(to_bool(&json!(0)), Some(false));
        assert_eq!(to_bool(&json!("7")), Some(true));
        assert_eq!(to_bool(&json!(-1.0)), Some(true));
    }

    #[test]
    fn bool_rejects_unknown_words() {
        assert_eq!(to_bool(&json!("maybe")), None);
        assert_eq!(to_bool(&json!({})), None);
    }

    #[test]
    fn datetime_from_epoch_seconds() {
        assert_eq!(to_datetime(&json!(0)), Some(DateTime::<Utc>::UNIX_EPOCH));
        let dt = to_datetime(&json!(1_700_000_000)).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn datetime_keeps_fractional_seconds() {
        let dt = to_datetime(&json!(1.5)).unwrap();
        assert_eq!(dt.timestamp(), 1);
        assert_eq!(dt.nanosecond(), 500_000_000);
    }

    #[test]
    fn datetime_from_iso_strings() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(to_datetime(&json!("2024-01-15T10:30:00Z")), Some(expected));
        assert_eq!(to_datetime(&json!("2024-01-15T12:30:00+02:00")), Some(expected));
        assert_eq!(to_datetime(&json!("2024-01-15T10:30:00")), Some(expected));
        assert_eq!(to_datetime(&json!("2024-01-15 10:30:00")), Some(expected));

        let date = to_datetime(&json!("2024-01-15")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 15));
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn datetime_rejects_garbage() {
        assert_eq!(to_datetime(&json!("not a date")), None);
        assert_eq!(to_datetime(&json!(true)), None);
        assert_eq!(to_datetime(&json!(null)), None);
    }
}
