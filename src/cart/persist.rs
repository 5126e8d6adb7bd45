//! Cart Persistence
//!
//! Local storage holds the camelCase form; the API receives and returns the
//! snake_case form produced by the field map.

use log::{debug, warn};
use serde_json::Value;

use super::Cart;
use crate::config::CART_STORAGE_KEY;
use crate::error::StorageError;
use crate::keymap::LINE_ITEM_MAP;
use crate::models::{new_line_item_id, LineItem};
use crate::storage::{self, DurableStorage};

/// Load the cart saved on this device. Anything unreadable becomes an empty
/// cart or a skipped entry.
pub fn load_local(storage: &dyn DurableStorage) -> Cart {
    let Some(value) = storage::read_json::<Value>(storage, CART_STORAGE_KEY) else {
        return Cart::new();
    };
    let items = items_from_value(value);
    debug!("Loaded {} cart items from local storage", items.len());
    Cart::from_items(items)
}

pub fn save_local(storage: &dyn DurableStorage, cart: &Cart) -> Result<(), StorageError> {
    storage::write_json(storage, CART_STORAGE_KEY, cart.list())
}

/// Line items in the API's naming
pub fn to_remote(items: &[LineItem]) -> Result<Value, serde_json::Error> {
    Ok(LINE_ITEM_MAP.to_remote(serde_json::to_value(items)?))
}

/// Parse a cart returned by the API. Accepts a bare array or an object with
/// an `items` / `cart` array.
pub fn from_remote(value: Value) -> Vec<LineItem> {
    let list = match value {
        Value::Object(mut map) => map
            .remove("items")
            .or_else(|| map.remove("cart"))
            .unwrap_or(Value::Null),
        other => other,
    };
    items_from_value(LINE_ITEM_MAP.to_local(list))
}

fn items_from_value(value: Value) -> Vec<LineItem> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Null => return Vec::new(),
        other => {
            warn!("Expected a list of cart items, got {}", other);
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<LineItem>(entry) {
            Ok(mut item) => {
                if item.id.is_empty() {
                    item.id = new_line_item_id();
                }
                Some(item)
            }
            Err(e) => {
                warn!("Dropping unreadable cart item: {}", e);
                None
            }
        })
        .collect()
}
