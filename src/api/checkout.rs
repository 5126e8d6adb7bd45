//! Checkout Endpoint
//!
//! Creates a payment-provider session; the client then navigates to its URL.

use reqwest::Method;

use super::cart::cart_body;
use super::{require_token, send_json, ApiClient};
use crate::error::ApiError;
use crate::models::{CheckoutSession, LineItem};

pub async fn create_checkout(api: &ApiClient, token: Option<&str>, items: &[LineItem]) -> Result<CheckoutSession, ApiError> {
    let token = require_token(token)?;
    let body = cart_body(items)?;
    let session: CheckoutSession = send_json(api.request(Method::POST, "/api/checkout", Some(token)).json(&body)).await?;
    if session.url.is_empty() {
        return Err(ApiError::Decode("checkout response has no url".to_string()));
    }
    Ok(session)
}
