//! Lenient JSON Readers
//!
//! The API and older local storage entries disagree on field types (numbers
//! vs numeric strings, ids as strings). These helpers read what is there and
//! return `None` instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// First present, non-null value among `keys`
pub fn pick<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

/// Number or numeric string
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

pub fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strings as-is, numbers and booleans rendered
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `YYYY-MM-DD`, optionally followed by a time part
pub fn as_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) or a bare date
pub fn as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    as_date(value)
        .filter(|_| s.len() == 10)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// Either a JSON array of strings or one comma-separated string
pub fn as_string_list(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(as_string).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// serde adapter: u32 from number or string, 0 otherwise
pub fn de_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(as_u32(&value).unwrap_or_default())
}

/// serde adapter: string from string or number, empty otherwise
pub fn de_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(as_string(&value).unwrap_or_default())
}

/// serde adapter: optional string from string or number, `None` otherwise
pub fn de_opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(as_string(&value))
}

/// serde adapter: timestamp in any accepted shape, now when unreadable
pub fn de_datetime_or_now<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(as_datetime(&value).unwrap_or_else(|| {
        if !value.is_null() {
            debug!("Unreadable timestamp {}, using now", value);
        }
        Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_f64() {
        assert_eq!(as_f64(&json!(12.5)), Some(12.5));
        assert_eq!(as_f64(&json!(" 40 ")), Some(40.0));
        assert_eq!(as_f64(&json!("bad")), None);
        assert_eq!(as_f64(&json!("NaN")), None);
        assert_eq!(as_f64(&json!(null)), None);
    }

    #[test]
    fn test_as_string_list() {
        assert_eq!(
            as_string_list(&json!("https://a/1.png, https://a/2.png,")),
            vec!["https://a/1.png", "https://a/2.png"]
        );
        assert_eq!(as_string_list(&json!(["x", 3, null])), vec!["x", "3"]);
        assert!(as_string_list(&json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_as_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 10, 1);
        assert_eq!(as_date(&json!("2024-10-01")), expected);
        assert_eq!(as_date(&json!("2024-10-01T08:00:00.000Z")), expected);
        assert_eq!(as_date(&json!("yesterday")), None);
    }

    #[test]
    fn test_as_datetime_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 10, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .map(|at| at.and_utc());
        assert_eq!(as_datetime(&json!("2024-10-01T08:00:00Z")), expected);
        assert_eq!(as_datetime(&json!("2024-10-01T10:00:00+02:00")), expected);
        assert_eq!(as_datetime(&json!("2024-10-01 08:00:00")), expected);
        assert!(as_datetime(&json!("2024-10-01")).is_some());
        assert_eq!(as_datetime(&json!("yesterday")), None);
        assert_eq!(as_datetime(&json!(1727769600)), None);
    }

    #[test]
    fn test_pick_skips_nulls() {
        let value = json!({"campaign_id": null, "id": 7});
        let map = value.as_object().unwrap();
        assert_eq!(pick(map, &["campaign_id", "id"]), Some(&json!(7)));
        assert_eq!(pick(map, &["missing"]), None);
    }
}
