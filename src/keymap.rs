//! Field Name Mapping
//!
//! The cart is stored locally with camelCase keys while the REST API speaks
//! snake_case (and calls the title `campaign_name`). One table drives the
//! translation in both directions; keys not in the table pass through.

use serde_json::{Map, Value};
use thiserror::Error;

/// Line item keys: (local, remote)
pub const LINE_ITEM_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("campaignId", "campaign_id"),
    ("campaignTitle", "campaign_name"),
    ("imageUrl", "image_url"),
    ("donationAmount", "donation_amount"),
    ("pledgeId", "pledge_id"),
    ("addedAt", "added_at"),
];

pub static LINE_ITEM_MAP: FieldMap = FieldMap::new(LINE_ITEM_FIELDS);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldMapError {
    #[error("Local key `{0}` is mapped twice")]
    DuplicateLocal(&'static str),

    #[error("Remote key `{0}` is mapped twice")]
    DuplicateRemote(&'static str),

    /// A name used on one side of a pair is used on the other side of a
    /// different pair, so pass-through keys would not round trip
    #[error("Key `{0}` is both a local and a remote name in different pairs")]
    Crossed(&'static str),

    #[error("Field `{0}` has no mapping")]
    Unmapped(String),
}

/// Bidirectional key table
#[derive(Debug)]
pub struct FieldMap {
    pairs: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    pub fn remote_key<'a>(&self, local: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(l, _)| *l == local)
            .map_or(local, |&(_, r)| r)
    }

    pub fn local_key<'a>(&self, remote: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(_, r)| *r == remote)
            .map_or(remote, |&(l, _)| l)
    }

    /// Rename object keys local → remote. Arrays are mapped element-wise,
    /// other values are returned as-is.
    pub fn to_remote(&self, value: Value) -> Value {
        self.rename(value, |k| self.remote_key(k).to_string())
    }

    /// Rename object keys remote → local
    pub fn to_local(&self, value: Value) -> Value {
        self.rename(value, |k| self.local_key(k).to_string())
    }

    fn rename(&self, value: Value, key: impl Fn(&str) -> String + Copy) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (key(&k), v))
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.rename(v, key)).collect()),
            other => other,
        }
    }

    /// Check that the table is a bijection and that renaming cannot collide
    /// with pass-through keys.
    pub fn validate(&self) -> Result<(), FieldMapError> {
        for (i, &(local, remote)) in self.pairs.iter().enumerate() {
            for (j, &(other_local, other_remote)) in self.pairs.iter().enumerate() {
                if i == j {
                    continue;
                }
                if local == other_local {
                    return Err(FieldMapError::DuplicateLocal(local));
                }
                if remote == other_remote {
                    return Err(FieldMapError::DuplicateRemote(remote));
                }
                if local == other_remote {
                    return Err(FieldMapError::Crossed(local));
                }
            }
        }
        Ok(())
    }

    /// Check that every key of a serialized sample object has a mapping
    pub fn validate_covers(&self, sample: &Value) -> Result<(), FieldMapError> {
        let Some(map) = sample.as_object() else {
            return Ok(());
        };
        match map.keys().find(|k| !self.pairs.iter().any(|(l, _)| *l == k.as_str())) {
            Some(missing) => Err(FieldMapError::Unmapped(missing.clone())),
            None => Ok(()),
        }
    }
}

/// Startup check of the line item table against a fully populated item
pub fn check_line_item_map() -> Result<(), FieldMapError> {
    LINE_ITEM_MAP.validate()?;
    let sample = crate::models::LineItem {
        id: crate::models::new_line_item_id(),
        campaign_id: 1,
        campaign_title: String::new(),
        image_url: String::new(),
        donation_amount: crate::models::Amount::new(1.0),
        pledge_id: Some(String::new()),
        added_at: chrono::Utc::now(),
    };
    let sample = serde_json::to_value(sample).map_err(|e| FieldMapError::Unmapped(e.to_string()))?;
    LINE_ITEM_MAP.validate_covers(&sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, LineItem};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn full_item() -> LineItem {
        LineItem {
            id: "0f8e5a42-0000-4000-8000-000000000001".into(),
            campaign_id: 7,
            campaign_title: "School Meals".into(),
            image_url: "https://cdn/meals.png".into(),
            donation_amount: Amount::new(25.5),
            pledge_id: Some("monthly".into()),
            added_at: Utc.with_ymd_and_hms(2024, 11, 2, 9, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_line_item_table_is_valid() {
        assert_eq!(LINE_ITEM_MAP.validate(), Ok(()));
        assert_eq!(check_line_item_map(), Ok(()));
    }

    #[test]
    fn test_line_item_table_covers_every_field() {
        let sample = serde_json::to_value(full_item()).unwrap();
        assert_eq!(LINE_ITEM_MAP.validate_covers(&sample), Ok(()));
    }

    #[test]
    fn test_round_trip_is_identity() {
        let item = full_item();
        let remote = LINE_ITEM_MAP.to_remote(serde_json::to_value(&item).unwrap());
        assert_eq!(remote["campaign_name"], "School Meals");
        assert_eq!(remote["donation_amount"], 25.5);
        assert!(remote.get("campaignId").is_none());

        let back: LineItem = serde_json::from_value(LINE_ITEM_MAP.to_local(remote)).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let value = json!([{"campaignId": 1, "note": "hi"}, 5]);
        let remote = LINE_ITEM_MAP.to_remote(value.clone());
        assert_eq!(remote, json!([{"campaign_id": 1, "note": "hi"}, 5]));
        assert_eq!(LINE_ITEM_MAP.to_local(remote), value);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        static DUP: &[(&str, &str)] = &[("a", "x"), ("a", "y")];
        static CROSSED: &[(&str, &str)] = &[("a", "b"), ("b", "c")];
        assert_eq!(FieldMap::new(DUP).validate(), Err(FieldMapError::DuplicateLocal("a")));
        assert_eq!(FieldMap::new(CROSSED).validate(), Err(FieldMapError::Crossed("b")));
    }

    #[test]
    fn test_validate_covers_reports_missing_key() {
        let sample = json!({"campaignId": 1, "extra": true});
        assert_eq!(
            LINE_ITEM_MAP.validate_covers(&sample),
            Err(FieldMapError::Unmapped("extra".into()))
        );
    }
}
