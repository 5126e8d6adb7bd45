//! Campaign Endpoints

use log::warn;
use reqwest::Method;
use serde_json::Value;

use super::{send_json, ApiClient};
use crate::error::ApiError;
use crate::models::{Campaign, NewCampaign};

pub async fn list_campaigns(api: &ApiClient) -> Result<Vec<Campaign>, ApiError> {
    let body: Value = send_json(api.request(Method::GET, "/api/campaigns", None)).await?;
    Ok(campaigns_from_value(body))
}

/// Returns the created campaign when the response describes one; `None`
/// when it only acknowledges the creation
pub async fn create_campaign(
    api: &ApiClient,
    token: Option<&str>,
    campaign: &NewCampaign,
) -> Result<Option<Campaign>, ApiError> {
    let request = api.request(Method::POST, "/api/campaigns", token).json(campaign);
    let body: Value = send_json(request).await?;
    Ok(campaign_from_value(body))
}

/// Accept a campaign object or `{ "campaign": {...} }`. An object without
/// an id or a title is not a usable campaign.
pub fn campaign_from_value(body: Value) -> Option<Campaign> {
    let map = match body {
        Value::Object(mut map) => match map.remove("campaign") {
            Some(Value::Object(inner)) => inner,
            _ => map,
        },
        _ => return None,
    };
    let campaign = Campaign::from_map(&map);
    (campaign.id != 0 && !campaign.title.trim().is_empty()).then_some(campaign)
}

/// Accept a bare array or `{ "campaigns": [...] }`; entries that are not
/// objects are dropped.
pub fn campaigns_from_value(body: Value) -> Vec<Campaign> {
    let list = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("campaigns") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    list.into_iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(Campaign::from_map(&map)),
            other => {
                warn!("Skipping campaign entry {}", other);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_campaigns_from_value_shapes() {
        let bare = campaigns_from_value(json!([{"campaign_id": 1}, "junk", {"id": 2}]));
        assert_eq!(bare.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);

        let wrapped = campaigns_from_value(json!({"campaigns": [{"id": 5}]}));
        assert_eq!(wrapped.len(), 1);

        assert!(campaigns_from_value(json!({"message": "down"})).is_empty());
        assert!(campaigns_from_value(Value::Null).is_empty());
    }

    #[test]
    fn test_campaign_from_value_shapes() {
        let bare = campaign_from_value(json!({"campaign_id": 7, "campaign_name": "Clean Water"})).unwrap();
        assert_eq!((bare.id, bare.title.as_str()), (7, "Clean Water"));

        let wrapped = campaign_from_value(json!({"message": "created", "campaign": {"id": 8, "title": "Books"}}));
        assert_eq!(wrapped.map(|c| c.id), Some(8));

        assert!(campaign_from_value(json!({"message": "created", "campaignId": 7})).is_none());
        assert!(campaign_from_value(json!({"id": 0, "title": "No id"})).is_none());
        assert!(campaign_from_value(json!([1, 2])).is_none());
    }
}
