//! Form Validation
//!
//! Each form validates into either its API payload or a map of field errors
//! shown next to the offending inputs.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{CampaignStatus, Credentials, NewCampaign, Registration, UrgencyLevel};

pub const SALUTATIONS: &[&str] = &["Mr", "Ms", "Mrs", "Dr", "Dato", "Datin", "Tan Sri"];
pub const MARKETING_PREFERENCES: &[&str] = &["Email", "SMS", "Whatsapp"];
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Field name → message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn check_email(errors: &mut FieldErrors, email: &str, required_message: &str) {
    if email.trim().is_empty() {
        errors.insert("email", required_message);
    } else if !is_valid_email(email) {
        errors.insert("email", "Invalid email address");
    }
}

pub fn validate_login(credentials: &Credentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &credentials.email, "Required");
    if credentials.password.is_empty() {
        errors.insert("password", "Required");
    }
    errors.into_result(())
}

pub fn validate_registration(form: &Registration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if form.name.trim().is_empty() {
        errors.insert("name", "Name is required");
    }
    check_email(&mut errors, &form.email, "Email is required");

    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", format!("Password must be at least {} characters", MIN_PASSWORD_LEN));
    }
    if form.confirm_password.is_empty() {
        errors.insert("confirmPassword", "Confirm Password is required");
    } else if form.confirm_password != form.password {
        errors.insert("confirmPassword", "Passwords must match");
    }

    if form.salutation.is_empty() {
        errors.insert("salutation", "Salutation is required");
    } else if !SALUTATIONS.contains(&form.salutation.as_str()) {
        errors.insert("salutation", "Unknown salutation");
    }
    if form.country.trim().is_empty() {
        errors.insert("country", "Country is required");
    }
    if let Some(unknown) = form
        .marketing_preferences
        .iter()
        .find(|p| !MARKETING_PREFERENCES.contains(&p.as_str()))
    {
        errors.insert("marketingPreferences", format!("Unknown preference {}", unknown));
    }
    errors.into_result(())
}

/// Raw campaign form input, as typed
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub image_urls: String,
    pub target_amount: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub urgency_level: String,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_urls: String::new(),
            target_amount: String::new(),
            start_date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
            end_date: String::new(),
            status: CampaignStatus::Active.as_str().to_string(),
            urgency_level: UrgencyLevel::Low.as_str().to_string(),
        }
    }
}

/// Split on commas and newlines, dropping blanks
pub fn parse_image_urls(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn validate_campaign(draft: &CampaignDraft) -> Result<NewCampaign, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.title.trim().is_empty() {
        errors.insert("title", "Title is required");
    }
    if draft.description.trim().is_empty() {
        errors.insert("description", "Description is required");
    }

    let target_amount = if draft.target_amount.trim().is_empty() {
        errors.insert("target_amount", "Target amount is required");
        0.0
    } else {
        match draft.target_amount.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            Ok(_) => {
                errors.insert("target_amount", "Target amount must be a positive number");
                0.0
            }
            Err(_) => {
                errors.insert("target_amount", "Target amount must be a number");
                0.0
            }
        }
    };

    let start_date = parse_date(&draft.start_date);
    if start_date.is_none() {
        errors.insert("start_date", "Start date is required");
    }
    let end_date = if draft.end_date.trim().is_empty() {
        None
    } else {
        match parse_date(&draft.end_date) {
            Some(end) if start_date.is_some_and(|start| end < start) => {
                errors.insert("end_date", "End date must be after start date");
                None
            }
            Some(end) => Some(end),
            None => {
                errors.insert("end_date", "End date is not a valid date");
                None
            }
        }
    };

    let campaign_status = CampaignStatus::parse(&draft.status);
    if campaign_status.is_none() {
        errors.insert("campaign_status", "Campaign status is required");
    }
    let urgency_level = UrgencyLevel::parse(&draft.urgency_level);
    if urgency_level.is_none() {
        errors.insert("urgency_level", "Urgency level is required");
    }

    let image_url = parse_image_urls(&draft.image_urls);
    if let Some(bad) = image_url
        .iter()
        .find(|u| !(u.starts_with("https://") || u.starts_with("http://")))
    {
        errors.insert("image_url", format!("Not a web address: {}", bad));
    }

    match (start_date, campaign_status, urgency_level) {
        (Some(start_date), Some(campaign_status), Some(urgency_level)) if errors.is_empty() => Ok(NewCampaign {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            image_url,
            target_amount,
            current_amount: 0.0,
            start_date,
            end_date,
            campaign_status,
            urgency_level,
        }),
        _ => Err(errors),
    }
}
