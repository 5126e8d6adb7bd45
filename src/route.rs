//! Page Routing
//!
//! Maps the browser location to a page and back. Navigation goes through
//! `AppContext::navigate`, which pushes a history entry.

use log::warn;
use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Campaigns,
    NewCampaign,
    Register,
    Login,
    Cart,
    PaymentSuccess { order_id: Option<String> },
}

impl Page {
    /// Resolve a pathname and query string (`?orderId=...`)
    pub fn from_location(path: &str, search: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Page::Home,
            "/campaigns" => Page::Campaigns,
            "/campaigns/new" => Page::NewCampaign,
            "/register" => Page::Register,
            "/login" => Page::Login,
            "/cart" => Page::Cart,
            "/payment-success" => Page::PaymentSuccess {
                order_id: query_param(search, "orderId"),
            },
            other => {
                warn!("Unknown path {other:?}, showing home page");
                Page::Home
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Campaigns => "/campaigns".to_string(),
            Page::NewCampaign => "/campaigns/new".to_string(),
            Page::Register => "/register".to_string(),
            Page::Login => "/login".to_string(),
            Page::Cart => "/cart".to_string(),
            Page::PaymentSuccess { order_id: Some(id) } => format!(
                "/payment-success?orderId={}",
                percent_encoding::utf8_percent_encode(id, percent_encoding::NON_ALPHANUMERIC)
            ),
            Page::PaymentSuccess { order_id: None } => "/payment-success".to_string(),
        }
    }

    /// Page for the current `window.location`
    pub fn current() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Page::Home;
        };
        let path = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        Page::from_location(&path, &search)
    }
}

/// Decoded value of the first `key=` pair in a query string
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| percent_decode_str(&v.replace('+', " ")).decode_utf8_lossy().into_owned())
        .filter(|v| !v.is_empty())
}

/// Push a history entry for `page` without reloading
pub fn push_history(page: &Page) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&page.path())) {
        warn!("history.pushState failed: {:?}", e);
    }
}

/// Leave the app for an external URL (payment provider)
pub fn redirect_external(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            warn!("Redirect to {url} failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location() {
        assert_eq!(Page::from_location("/", ""), Page::Home);
        assert_eq!(Page::from_location("/cart/", ""), Page::Cart);
        assert_eq!(Page::from_location("/campaigns/new", ""), Page::NewCampaign);
        assert_eq!(Page::from_location("/nowhere", ""), Page::Home);
        assert_eq!(
            Page::from_location("/payment-success", "?orderId=ord%2042&x=1"),
            Page::PaymentSuccess { order_id: Some("ord 42".into()) }
        );
        assert_eq!(
            Page::from_location("/payment-success", "?orderId="),
            Page::PaymentSuccess { order_id: None }
        );
    }

    #[test]
    fn test_path_round_trip() {
        let pages = [
            Page::Home,
            Page::Campaigns,
            Page::NewCampaign,
            Page::Register,
            Page::Login,
            Page::Cart,
            Page::PaymentSuccess { order_id: Some("cs_1/2".into()) },
        ];
        for page in pages {
            let path = page.path();
            let (p, q) = path.split_once('?').unwrap_or((path.as_str(), ""));
            assert_eq!(Page::from_location(p, q), page);
        }
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("?a=1&orderId=77", "orderId").as_deref(), Some("77"));
        assert_eq!(query_param("orderId=a+b", "orderId").as_deref(), Some("a b"));
        assert_eq!(query_param("?other=1", "orderId"), None);
    }
}
