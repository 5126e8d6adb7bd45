//! Application Configuration
//!
//! Values are baked in at build time from `CROWDFUND_*` environment variables
//! (a WASM bundle has no process environment), with defaults for local
//! development.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use log::{info, warn, LevelFilter};

/// Local storage key for the serialized cart
pub const CART_STORAGE_KEY: &str = "cart";
/// Local storage key for the session token
pub const SESSION_STORAGE_KEY: &str = "jwt";

/// Preset donation buttons on a campaign card
pub const DONATION_PRESETS: &[u32] = &[10, 20, 50, 100];
pub const DEFAULT_DONATION: u32 = 10;

/// Number of campaigns shown on the home page
pub const FEATURED_COUNT: usize = 4;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_FLASH_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the REST API, without trailing slash
    pub api_url: String,
    /// How long a flash message stays visible
    pub flash_duration: Duration,
}

impl Config {
    /// Load configuration. Call after the logger is installed so that
    /// fallbacks are reported.
    pub fn load() -> Self {
        let api_url = try_load("CROWDFUND_API_URL", option_env!("CROWDFUND_API_URL"), DEFAULT_API_URL.to_string());
        let flash_ms = try_load("CROWDFUND_FLASH_MS", option_env!("CROWDFUND_FLASH_MS"), DEFAULT_FLASH_MS);

        let config = Self {
            api_url: normalize_base_url(&api_url),
            flash_duration: Duration::from_millis(flash_ms),
        };
        info!("Configuration loaded: api_url={}, flash={}ms", config.api_url, flash_ms);
        config
    }

    /// Log level for the console logger. Read separately from `load` because
    /// it is needed before logging exists.
    pub fn log_level() -> LevelFilter {
        option_env!("CROWDFUND_LOG_LEVEL")
            .and_then(console_logger::parse_level)
            .unwrap_or(if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            flash_duration: Duration::from_millis(DEFAULT_FLASH_MS),
        }
    }
}

fn try_load<T: FromStr>(key: &str, raw: Option<&str>, default: T) -> T
where
    T::Err: Display,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => {
            info!("{key} not set, using default");
            default
        }
        Some(value) => value.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {value:?}: {e}, using default");
            default
        }),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back() {
        assert_eq!(try_load("X", None, 5u64), 5);
        assert_eq!(try_load("X", Some("  "), 5u64), 5);
        assert_eq!(try_load("X", Some("abc"), 5u64), 5);
        assert_eq!(try_load("X", Some("1500"), 5u64), 1500);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://api.test/"), "http://api.test");
        assert_eq!(normalize_base_url(" http://api.test// "), "http://api.test");
    }

    #[test]
    fn test_default_flash_duration() {
        assert_eq!(Config::default().flash_duration, Duration::from_secs(3));
    }
}
