//! Cart Endpoints
//!
//! The remote cart uses the API's snake_case field names.

use reqwest::Method;
use serde_json::{json, Value};

use super::{require_token, send_empty, send_json, ApiClient};
use crate::cart;
use crate::error::ApiError;
use crate::models::LineItem;

pub async fn get_cart(api: &ApiClient, token: Option<&str>) -> Result<Vec<LineItem>, ApiError> {
    let token = require_token(token)?;
    let body: Value = send_json(api.request(Method::GET, "/api/cart", Some(token))).await?;
    Ok(cart::from_remote(body))
}

pub async fn put_cart(api: &ApiClient, token: Option<&str>, items: &[LineItem]) -> Result<(), ApiError> {
    let token = require_token(token)?;
    let body = cart_body(items)?;
    send_empty(api.request(Method::PUT, "/api/cart", Some(token)).json(&body)).await
}

pub(super) fn cart_body(items: &[LineItem]) -> Result<Value, ApiError> {
    let items = cart::to_remote(items).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(json!({ "items": items }))
}
