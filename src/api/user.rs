//! User Endpoints

use reqwest::Method;

use super::{require_token, send_empty, send_json, ApiClient};
use crate::error::ApiError;
use crate::models::{AuthStatus, Credentials, LoginResponse, Registration};

pub async fn register(api: &ApiClient, registration: &Registration) -> Result<(), ApiError> {
    send_empty(api.request(Method::POST, "/api/users/register", None).json(registration)).await
}

/// Returns the session token on success
pub async fn login(api: &ApiClient, credentials: &Credentials) -> Result<String, ApiError> {
    let response: LoginResponse = send_json(api.request(Method::POST, "/api/users/login", None).json(credentials)).await?;
    if response.token.is_empty() {
        return Err(ApiError::Decode(
            response.message.unwrap_or_else(|| "login response has no token".to_string()),
        ));
    }
    Ok(response.token)
}

pub async fn logout(api: &ApiClient, token: Option<&str>) -> Result<(), ApiError> {
    send_empty(api.request(Method::POST, "/api/users/logout", token)).await
}

/// Ask the API whether the stored token is still accepted
pub async fn auth_status(api: &ApiClient, token: Option<&str>) -> Result<AuthStatus, ApiError> {
    let token = require_token(token)?;
    send_json(api.request(Method::GET, "/api/users/status", Some(token))).await
}
