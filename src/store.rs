//! Campaign Catalog Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Campaign;

/// Campaigns fetched from the API with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CatalogState {
    /// Campaigns in API order
    pub campaigns: Vec<Campaign>,
    /// Whether the first fetch has finished (successfully or not)
    pub loaded: bool,
    /// Message of the last failed fetch
    pub load_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<CatalogState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the catalog after a successful fetch
pub fn store_set_campaigns(store: &AppStore, campaigns: Vec<Campaign>) {
    store.campaigns().set(campaigns);
    store.load_error().set(None);
    store.loaded().set(true);
}

/// Record a failed fetch, keeping what was loaded before
pub fn store_set_load_error(store: &AppStore, message: String) {
    store.load_error().set(Some(message));
    store.loaded().set(true);
}

/// Add a newly created campaign, replacing one with the same id
pub fn store_add_campaign(store: &AppStore, campaign: Campaign) {
    let field = store.campaigns();
    let mut campaigns = field.write();
    match campaigns.iter_mut().find(|c| c.id == campaign.id && campaign.id != 0) {
        Some(existing) => *existing = campaign,
        None => campaigns.push(campaign),
    }
}

/// Most urgent campaigns first (API order within the same urgency), active
/// ones only
pub fn featured_campaigns(campaigns: &[Campaign], count: usize) -> Vec<Campaign> {
    let mut active: Vec<Campaign> = campaigns
        .iter()
        .filter(|c| c.status == crate::models::CampaignStatus::Active)
        .cloned()
        .collect();
    active.sort_by_key(|c| c.urgency_level.rank());
    active.truncate(count);
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CampaignStatus, UrgencyLevel};

    fn campaign(id: u32, urgency_level: UrgencyLevel, status: CampaignStatus) -> Campaign {
        Campaign {
            id,
            title: format!("Campaign {}", id),
            urgency_level,
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_featured_campaigns() {
        let campaigns = vec![
            campaign(1, UrgencyLevel::Low, CampaignStatus::Active),
            campaign(2, UrgencyLevel::High, CampaignStatus::Active),
            campaign(3, UrgencyLevel::High, CampaignStatus::Completed),
            campaign(4, UrgencyLevel::Medium, CampaignStatus::Active),
            campaign(5, UrgencyLevel::High, CampaignStatus::Active),
        ];
        let featured: Vec<u32> = featured_campaigns(&campaigns, 3).iter().map(|c| c.id).collect();
        assert_eq!(featured, vec![2, 5, 4]);
    }

    #[test]
    fn test_store_add_campaign_replaces_same_id() {
        let owner = Owner::new();
        owner.with(|| {
            let store = Store::new(CatalogState::default());
            store_set_campaigns(&store, vec![campaign(1, UrgencyLevel::Low, CampaignStatus::Active)]);

            let mut updated = campaign(1, UrgencyLevel::High, CampaignStatus::Active);
            updated.title = "Renamed".into();
            store_add_campaign(&store, updated);
            store_add_campaign(&store, campaign(2, UrgencyLevel::Low, CampaignStatus::Active));

            let campaigns = store.campaigns().get_untracked();
            assert_eq!(campaigns.len(), 2);
            assert_eq!(campaigns[0].title, "Renamed");
            assert!(store.loaded().get_untracked());
            assert_eq!(store.load_error().get_untracked(), None);
        });
    }

    #[test]
    fn test_featured_with_fewer_campaigns() {
        let campaigns = vec![campaign(1, UrgencyLevel::Low, CampaignStatus::Active)];
        assert_eq!(featured_campaigns(&campaigns, 4).len(), 1);
        assert!(featured_campaigns(&[], 4).is_empty());
    }
}
