//! REST API Client
//!
//! Thin async wrappers over the crowdfunding API, organized by resource.

mod campaign;
mod cart;
mod checkout;
mod order;
mod user;

use log::debug;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

// Re-export all public items
pub use campaign::*;
pub use cart::*;
pub use checkout::*;
pub use order::*;
pub use user::*;

/// API location; cheap to clone into async tasks
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let builder = reqwest::Client::new().request(method, url);
        // Send the API's own cookies along with cross-origin requests
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Send and decode a JSON body
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = check_status(request.send().await?).await?;
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send and ignore the body
async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
    check_status(request.send().await?).await.map(|_| ())
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&body, status.as_u16()),
    })
}

/// Human readable text for an error response: the body's `message` or
/// `error` field when present
pub fn error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

fn require_token(token: Option<&str>) -> Result<&str, ApiError> {
    token.filter(|t| !t.is_empty()).ok_or(ApiError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_cleanly() {
        let api = ApiClient::new("http://localhost:3000/");
        assert_eq!(api.url("/api/campaigns"), "http://localhost:3000/api/campaigns");
        assert_eq!(api.url("api/cart"), "http://localhost:3000/api/cart");
    }

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(error_message(r#"{"message":"Invalid credentials"}"#, 401), "Invalid credentials");
        assert_eq!(error_message(r#"{"error":"Campaign not found"}"#, 404), "Campaign not found");
        assert_eq!(error_message("<html>oops</html>", 502), "Request failed with status 502");
        assert_eq!(error_message(r#"{"message":""}"#, 400), "Request failed with status 400");
    }

    #[test]
    fn test_require_token() {
        assert_eq!(require_token(Some("abc")), Ok("abc"));
        assert_eq!(require_token(Some("")), Err(ApiError::Unauthenticated));
        assert_eq!(require_token(None), Err(ApiError::Unauthenticated));
    }
}
