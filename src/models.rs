//! Frontend Models
//!
//! Data structures exchanged with the REST API and kept in local storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::lenient;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Inactive,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 4] = [
        CampaignStatus::Active,
        CampaignStatus::Inactive,
        CampaignStatus::Completed,
        CampaignStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Inactive => "inactive",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Inactive => "Inactive",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// How urgently a campaign needs funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 3] = [UrgencyLevel::High, UrgencyLevel::Medium, UrgencyLevel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::High => "high",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyLevel::High => "High",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::Low => "Low",
        }
    }

    /// Sort key, most urgent first
    pub fn rank(&self) -> u8 {
        match self {
            UrgencyLevel::High => 0,
            UrgencyLevel::Medium => 1,
            UrgencyLevel::Low => 2,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Campaign as served by the API (read-only on the client)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Campaign {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: CampaignStatus,
    pub urgency_level: UrgencyLevel,
}

impl Campaign {
    /// Build from a JSON object, accepting both field spellings the API uses.
    /// Missing or mistyped fields take their defaults.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let text = |keys: &[&str]| {
            lenient::pick(map, keys)
                .and_then(lenient::as_string)
                .unwrap_or_default()
        };
        let number = |keys: &[&str]| {
            lenient::pick(map, keys)
                .and_then(lenient::as_f64)
                .unwrap_or_default()
        };
        let date = |keys: &[&str]| lenient::pick(map, keys).and_then(lenient::as_date);

        Self {
            id: lenient::pick(map, &["campaign_id", "id", "campaignId"])
                .and_then(lenient::as_u32)
                .unwrap_or_default(),
            title: text(&["campaign_name", "title", "campaignName"]),
            description: text(&["campaign_description", "description"]),
            image_urls: lenient::pick(map, &["image_url", "image_urls", "imageUrls", "imageUrl", "image"])
                .map(lenient::as_string_list)
                .unwrap_or_default(),
            target_amount: number(&["target_amount", "targetAmount", "goal"]),
            current_amount: number(&["current_amount", "currentAmount", "raised"]),
            start_date: date(&["start_date", "startDate"]),
            end_date: date(&["end_date", "endDate"]),
            status: lenient::pick(map, &["campaign_status", "status"])
                .and_then(Value::as_str)
                .and_then(CampaignStatus::parse)
                .unwrap_or_default(),
            urgency_level: lenient::pick(map, &["urgency_level", "urgencyLevel"])
                .and_then(Value::as_str)
                .and_then(UrgencyLevel::parse)
                .unwrap_or_default(),
        }
    }

    /// First image, used as the card thumbnail
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Funded share of the target in percent, clamped to 0..=100
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }
}

impl<'de> Deserialize<'de> for Campaign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::deserialize(deserializer)?;
        Ok(Campaign::from_map(&map))
    }
}

/// Payload for `POST /api/campaigns`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub image_url: Vec<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub campaign_status: CampaignStatus,
    pub urgency_level: UrgencyLevel,
}

/// Donation amount as stored. Keeps whatever JSON value was loaded so a
/// malformed entry survives a round trip instead of failing the whole cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Amount(Value);

impl Amount {
    pub fn new(value: f64) -> Self {
        Amount(Value::from(value))
    }

    /// The amount when it is a finite positive number
    pub fn value(&self) -> Option<f64> {
        lenient::as_f64(&self.0).filter(|v| *v > 0.0)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Amount {
    fn from(value: Value) -> Self {
        Amount(value)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Amount)
    }
}

/// One donation pledge waiting for checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default = "new_line_item_id", deserialize_with = "lenient::de_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::de_u32")]
    pub campaign_id: u32,
    #[serde(default, deserialize_with = "lenient::de_string")]
    pub campaign_title: String,
    #[serde(default, deserialize_with = "lenient::de_string")]
    pub image_url: String,
    #[serde(default)]
    pub donation_amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::de_opt_string")]
    pub pledge_id: Option<String>,
    #[serde(default = "Utc::now", deserialize_with = "lenient::de_datetime_or_now")]
    pub added_at: DateTime<Utc>,
}

pub fn new_line_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Payload for `POST /api/users/register`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub salutation: String,
    pub marketing_preferences: Vec<String>,
    pub country: String,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            salutation: String::new(),
            marketing_preferences: Vec::new(),
            country: "Malaysia".to_string(),
        }
    }
}

/// Payload for `POST /api/users/login`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthStatus {
    #[serde(alias = "loggedIn", alias = "isAuthenticated")]
    pub authenticated: bool,
}

/// Response of `POST /api/checkout`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckoutSession {
    #[serde(alias = "sessionUrl", alias = "checkout_url")]
    pub url: String,
}

/// Order looked up after the payment provider redirects back
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: String,
    pub campaign_progress: f64,
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::deserialize(deserializer)?;
        Ok(Order {
            id: lenient::pick(&map, &["id", "order_id", "orderId"])
                .and_then(lenient::as_string)
                .unwrap_or_default(),
            campaign_progress: lenient::pick(&map, &["campaignProgress", "campaign_progress"])
                .and_then(lenient::as_f64)
                .unwrap_or_default()
                .clamp(0.0, 100.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_campaign_from_remote_shape() {
        let campaign: Campaign = serde_json::from_value(json!({
            "campaign_id": 3,
            "campaign_name": "Clean Water",
            "campaign_description": "Wells for villages",
            "image_url": "https://cdn/a.png,https://cdn/b.png",
            "target_amount": "1000.00",
            "current_amount": 250,
            "start_date": "2024-10-01T00:00:00.000Z",
            "campaign_status": "completed",
            "urgency_level": "high"
        }))
        .unwrap();

        assert_eq!(campaign.id, 3);
        assert_eq!(campaign.title, "Clean Water");
        assert_eq!(campaign.cover_image(), Some("https://cdn/a.png"));
        assert_eq!(campaign.image_urls.len(), 2);
        assert_eq!(campaign.target_amount, 1000.0);
        assert_eq!(campaign.progress_percent(), 25.0);
        assert_eq!(campaign.start_date, NaiveDate::from_ymd_opt(2024, 10, 1));
        assert_eq!(campaign.end_date, None);
        assert_eq!(campaign.status, CampaignStatus::Completed);
        assert_eq!(campaign.urgency_level, UrgencyLevel::High);
    }

    #[test]
    fn test_campaign_missing_fields_default() {
        let campaign: Campaign = serde_json::from_value(json!({"id": "9", "title": "Bare"})).unwrap();
        assert_eq!(campaign.id, 9);
        assert_eq!(campaign.title, "Bare");
        assert!(campaign.image_urls.is_empty());
        assert_eq!(campaign.status, CampaignStatus::Active);
        assert_eq!(campaign.urgency_level, UrgencyLevel::Low);
        assert_eq!(campaign.progress_percent(), 0.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let campaign = Campaign { target_amount: 100.0, current_amount: 250.0, ..Default::default() };
        assert_eq!(campaign.progress_percent(), 100.0);
    }

    #[test]
    fn test_amount_value() {
        assert_eq!(Amount::new(20.0).value(), Some(20.0));
        assert_eq!(Amount::from(json!("15")).value(), Some(15.0));
        assert_eq!(Amount::from(json!("bad")).value(), None);
        assert_eq!(Amount::from(json!(-5)).value(), None);
        assert_eq!(Amount::default().value(), None);
    }

    #[test]
    fn test_line_item_tolerates_legacy_entry() {
        let item: LineItem = serde_json::from_value(json!({
            "campaignId": "4",
            "campaignTitle": "Organic Green Tea",
            "donationAmount": "abc"
        }))
        .unwrap();
        assert_eq!(item.campaign_id, 4);
        assert!(!item.id.is_empty());
        assert_eq!(item.donation_amount.value(), None);
        assert_eq!(item.image_url, "");
    }

    #[test]
    fn test_order_progress_defaults() {
        let order: Order = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(order.id, "42");
        assert_eq!(order.campaign_progress, 0.0);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(CampaignStatus::parse("Cancelled"), Some(CampaignStatus::Cancelled));
        assert_eq!(UrgencyLevel::parse("medium"), Some(UrgencyLevel::Medium));
        assert_eq!(UrgencyLevel::parse("urgent"), None);
    }

    #[test]
    fn test_new_campaign_wire_names() {
        let payload = NewCampaign {
            title: "T".into(),
            description: "D".into(),
            image_url: vec!["https://x/y.png".into()],
            target_amount: 500.0,
            current_amount: 0.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
            campaign_status: CampaignStatus::Active,
            urgency_level: UrgencyLevel::Medium,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["campaign_status"], "active");
        assert_eq!(value["urgency_level"], "medium");
        assert_eq!(value["start_date"], "2025-01-01");
        assert_eq!(value["end_date"], Value::Null);
    }
}
