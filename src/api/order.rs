//! Order Endpoint

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;

use super::{send_json, ApiClient};
use crate::error::ApiError;
use crate::models::Order;

pub async fn get_order(api: &ApiClient, order_id: &str) -> Result<Order, ApiError> {
    send_json(api.request(Method::GET, &order_path(order_id), None)).await
}

fn order_path(order_id: &str) -> String {
    format!("/api/orders/{}", utf8_percent_encode(order_id, NON_ALPHANUMERIC))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_path_encodes_id() {
        assert_eq!(order_path("cs_123"), "/api/orders/cs%5F123");
        assert_eq!(order_path("42"), "/api/orders/42");
        assert_eq!(order_path("../admin"), "/api/orders/%2E%2E%2Fadmin");
    }
}
