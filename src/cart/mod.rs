//! Donation Cart
//!
//! `Cart` is the plain ordered list of line items with its rules;
//! `CartStore` wraps it in reactive state and handles persistence.

mod persist;
mod queue;
mod store;

pub use persist::{from_remote, load_local, save_local, to_remote};
pub use queue::WriteQueue;
pub use store::{CartStore, SyncState};

use chrono::Utc;
use log::warn;

use crate::error::CartError;
use crate::models::{new_line_item_id, Amount, LineItem};

/// What the user picked on a campaign card
#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub campaign_id: u32,
    pub campaign_title: String,
    pub image_url: String,
    pub amount: f64,
    pub pledge_id: Option<String>,
}

/// Sum of valid amounts and the ids of items that were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartTotal {
    pub amount: f64,
    pub skipped: Vec<String>,
}

/// Ordered line items. Several items for the same campaign may coexist; each
/// has its own generated id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    /// Append a line item. Rejects a missing campaign id or a non-positive
    /// amount without touching the cart.
    pub fn add(&mut self, donation: Donation) -> Result<&LineItem, CartError> {
        if donation.campaign_id == 0 {
            return Err(CartError::MissingCampaign);
        }
        if !donation.amount.is_finite() || donation.amount <= 0.0 {
            return Err(CartError::InvalidAmount(donation.amount.to_string()));
        }

        self.items.push(LineItem {
            id: new_line_item_id(),
            campaign_id: donation.campaign_id,
            campaign_title: donation.campaign_title,
            image_url: donation.image_url,
            donation_amount: Amount::new(donation.amount),
            pledge_id: donation.pledge_id,
            added_at: Utc::now(),
        });
        self.items.last().ok_or(CartError::Unavailable)
    }

    /// Remove by line item id; returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn replace(&mut self, items: Vec<LineItem>) {
        self.items = items;
    }

    pub fn list(&self) -> &[LineItem] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of valid amounts; each malformed amount is logged and skipped
    pub fn summarize(&self) -> CartTotal {
        self.items.iter().fold(CartTotal::default(), |mut acc, item| {
            match item.donation_amount.value() {
                Some(amount) => acc.amount += amount,
                None => {
                    warn!(
                        "Skipping line item {} with invalid amount {}",
                        item.id,
                        item.donation_amount.raw()
                    );
                    acc.skipped.push(item.id.clone());
                }
            }
            acc
        })
    }

    /// Sum of donation amounts; malformed amounts count as zero
    pub fn total(&self) -> f64 {
        self.summarize().amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn donation(campaign_id: u32, amount: f64) -> Donation {
        Donation {
            campaign_id,
            campaign_title: format!("Campaign {}", campaign_id),
            image_url: String::new(),
            amount,
            pledge_id: None,
        }
    }

    fn item_with_amount(raw: serde_json::Value) -> LineItem {
        serde_json::from_value(json!({"campaignId": 1, "donationAmount": raw})).unwrap()
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut cart = Cart::new();
        cart.add(donation(1, 10.0)).unwrap();
        let before = cart.clone();
        let before_total = cart.total();

        let id = cart.add(donation(2, 35.0)).unwrap().id.clone();
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), 45.0);

        assert!(cart.remove(&id));
        assert_eq!(cart, before);
        assert_eq!(cart.total(), before_total);
    }

    #[test]
    fn test_add_returns_the_appended_item() {
        let mut cart = Cart::new();
        cart.add(donation(1, 10.0)).unwrap();
        let added = cart.add(donation(2, 15.0)).unwrap().clone();
        assert_eq!(added.campaign_id, 2);
        assert_eq!(added.donation_amount.value(), Some(15.0));
        assert_eq!(cart.list().last(), Some(&added));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(donation(1, 10.0)).unwrap();
        assert!(!cart.remove("no-such-id"));
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_duplicate_campaigns_get_distinct_ids() {
        let mut cart = Cart::new();
        let first = cart.add(donation(5, 10.0)).unwrap().id.clone();
        let second = cart.add(donation(5, 20.0)).unwrap().id.clone();

        assert_eq!(cart.count(), 2);
        assert_ne!(first, second);
        assert!(cart.list().iter().all(|i| i.campaign_id == 5));
    }

    #[test]
    fn test_total_skips_malformed_amounts() {
        let cart = Cart::from_items(vec![
            item_with_amount(json!(10)),
            item_with_amount(json!(20)),
            item_with_amount(json!("bad")),
            item_with_amount(json!(50)),
        ]);
        assert_eq!(cart.total(), 80.0);

        let summary = cart.summarize();
        assert_eq!(summary.amount, 80.0);
        assert_eq!(summary.skipped, vec![cart.list()[2].id.clone()]);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(donation(0, 10.0)).unwrap_err(), CartError::MissingCampaign);
        assert!(matches!(cart.add(donation(1, 0.0)), Err(CartError::InvalidAmount(_))));
        assert!(matches!(cart.add(donation(1, -3.0)), Err(CartError::InvalidAmount(_))));
        assert!(matches!(cart.add(donation(1, f64::NAN)), Err(CartError::InvalidAmount(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut cart = Cart::new();
        for id in [3, 1, 2] {
            cart.add(donation(id, 10.0)).unwrap();
        }
        let order: Vec<u32> = cart.list().iter().map(|i| i.campaign_id).collect();
        assert_eq!(order, vec![3, 1, 2]);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
