//! Harness Configuration
//!
//! Configuration types for assembling a page set: where the pages
//! live and how the trail is logged.

use serde::{Deserialize, Serialize};

use crate::logging::LoggerConfig;

/// Default base URL of the application under test
pub const DEFAULT_BASE_URL: &str = "https://app.example.test";

/// URLs of the three stock pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageUrls {
    /// Registration page URL
    pub registration: String,
    /// Login page URL
    pub login: String,
    /// Landing page URL
    pub landing: String,
}

impl PageUrls {
    /// Derive the page set from a base URL
    ///
    /// Trailing slashes on `base` are dropped before the fixed paths
    /// `/register`, `/login` and `/welcome` are appended.
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            registration: format!("{base}/register"),
            login: format!("{base}/login"),
            landing: format!("{base}/welcome"),
        }
    }
}

impl Default for PageUrls {
    fn default() -> Self {
        Self::with_base(DEFAULT_BASE_URL)
    }
}

/// Everything a harness run needs: page URLs plus logger settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Where the pages live
    pub urls: PageUrls,
    /// How the trail is logged
    pub logger: LoggerConfig,
}

impl HarnessConfig {
    /// Configuration against a base URL with default logging
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        Self {
            urls: PageUrls::with_base(base),
            logger: LoggerConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn test_with_base_appends_fixed_paths() {
        let urls = PageUrls::with_base("https://staging.example.test");
        assert_eq!(urls.registration, "https://staging.example.test/register");
        assert_eq!(urls.login, "https://staging.example.test/login");
        assert_eq!(urls.landing, "https://staging.example.test/welcome");
    }

    #[test]
    fn test_with_base_drops_trailing_slashes() {
        let urls = PageUrls::with_base("https://staging.example.test//");
        assert_eq!(urls.registration, "https://staging.example.test/register");
    }

    #[test]
    fn test_default_uses_stock_base() {
        let urls = PageUrls::default();
        assert_eq!(urls, PageUrls::with_base(DEFAULT_BASE_URL));
        assert_eq!(urls.landing, "https://app.example.test/welcome");
    }

    #[test]
    fn test_harness_config_default_logger() {
        let config = HarnessConfig::default();
        assert_eq!(config.logger.min_level, LogLevel::Element);
        assert!(config.logger.console);
        assert!(config.logger.file.is_none());
    }

    #[test]
    fn test_harness_config_with_base() {
        let config = HarnessConfig::with_base("http://localhost:4200");
        assert_eq!(config.urls.login, "http://localhost:4200/login");
        assert_eq!(config.logger, LoggerConfig::default());
    }

    #[test]
    fn test_page_urls_serialization() {
        let urls = PageUrls::with_base("https://ci.example.test");
        let json = serde_json::to_string(&urls).unwrap();
        let back: PageUrls = serde_json::from_str(&json).unwrap();
        assert_eq!(back, urls);
    }

    #[test]
    fn test_harness_config_deserializes_from_literal() {
        let json = r#"{
            "urls": {
                "registration": "https://a.test/register",
                "login": "https://a.test/login",
                "landing": "https://a.test/welcome"
            },
            "logger": {
                "min_level": "assert",
                "console": false,
                "file": "/tmp/trail.jsonl"
            }
        }"#;
        let config: HarnessConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.urls.registration, "https://a.test/register");
        assert_eq!(config.logger.min_level, LogLevel::Assert);
        assert!(!config.logger.console);
        assert_eq!(
            config.logger.file.as_deref(),
            Some(std::path::Path::new("/tmp/trail.jsonl"))
        );
    }
}
