//! Landing page configuration.
//!
//! On the server the configuration is loaded with `LandingConfig::from_env()`
//! after calling `dotenvy::dotenv()`. The hydrating client receives the same
//! values through a `<meta name="waitlist-config">` tag (see [`CONFIG_META_NAME`]).

use serde::{Deserialize, Serialize};

/// Name of the meta tag carrying the serialized configuration to the client
pub const CONFIG_META_NAME: &str = "waitlist-config";

/// Placeholder endpoint value shipped in templates; treated as "not configured"
pub const ENDPOINT_PLACEHOLDER: &str = "YOUR_ENDPOINT_URL";

/// Waitlist landing page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Count shown before any signup has happened on this browser
    pub initial_waitlist_count: u64,

    /// Submit through the same-origin form relay
    pub relay_enabled: bool,

    /// Form identifier sent to the relay as `form-name`
    pub relay_form_name: String,

    /// Page tag sent to the relay
    pub page_tag: String,

    /// Custom JSON signup endpoint
    /// Example: https://api.example.com/waitlist
    pub endpoint_url: Option<String>,

    /// Source tag attached to every signup
    pub source_tag: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            initial_waitlist_count: 247,
            relay_enabled: false,
            relay_form_name: "waitlist".to_string(),
            page_tag: "landing".to_string(),
            endpoint_url: None,
            source_tag: "landing_page".to_string(),
        }
    }
}

impl LandingConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    /// Unset or unparsable variables keep their default value.
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            initial_waitlist_count: lookup("WAITLIST_INITIAL_COUNT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.initial_waitlist_count),
            relay_enabled: lookup("WAITLIST_RELAY_ENABLED")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.relay_enabled),
            relay_form_name: lookup("WAITLIST_RELAY_FORM_NAME")
                .unwrap_or(defaults.relay_form_name),
            page_tag: lookup("WAITLIST_PAGE_TAG").unwrap_or(defaults.page_tag),
            endpoint_url: lookup("WAITLIST_ENDPOINT_URL").or(defaults.endpoint_url),
            source_tag: lookup("WAITLIST_SOURCE_TAG").unwrap_or(defaults.source_tag),
        }
    }

    /// Parse the configuration embedded in the page, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                leptos::logging::warn!("Invalid embedded config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize for embedding in the page
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The custom endpoint URL if it has been set to a real value
    pub fn configured_endpoint(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != ENDPOINT_PLACEHOLDER)
    }

    /// Check if a custom endpoint is configured
    pub fn has_endpoint(&self) -> bool {
        self.configured_endpoint().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ========================================================================
    // Lookup Tests (no env var dependencies - thread safe)
    // ========================================================================

    #[test]
    fn test_from_lookup_with_no_values() {
        let config = LandingConfig::from_lookup(|_| None);
        assert_eq!(config, LandingConfig::default());
        assert_eq!(config.initial_waitlist_count, 247);
        assert!(!config.relay_enabled);
    }

    #[test]
    fn test_from_lookup_with_all_values() {
        let config = LandingConfig::from_lookup(lookup_from(&[
            ("WAITLIST_INITIAL_COUNT", "1200"),
            ("WAITLIST_RELAY_ENABLED", "true"),
            ("WAITLIST_RELAY_FORM_NAME", "early-access"),
            ("WAITLIST_PAGE_TAG", "home"),
            ("WAITLIST_ENDPOINT_URL", "https://api.example.com/signup"),
            ("WAITLIST_SOURCE_TAG", "hero"),
        ]));

        assert_eq!(config.initial_waitlist_count, 1200);
        assert!(config.relay_enabled);
        assert_eq!(config.relay_form_name, "early-access");
        assert_eq!(config.page_tag, "home");
        assert_eq!(
            config.configured_endpoint(),
            Some("https://api.example.com/signup")
        );
        assert_eq!(config.source_tag, "hero");
    }

    #[test]
    fn test_unparsable_count_keeps_default() {
        let config = LandingConfig::from_lookup(lookup_from(&[("WAITLIST_INITIAL_COUNT", "lots")]));
        assert_eq!(config.initial_waitlist_count, 247);
    }

    #[test]
    fn test_relay_flag_values() {
        for value in ["1", "TRUE", "yes"] {
            let config =
                LandingConfig::from_lookup(lookup_from(&[("WAITLIST_RELAY_ENABLED", value)]));
            assert!(config.relay_enabled, "{value} should enable the relay");
        }
        let config = LandingConfig::from_lookup(lookup_from(&[("WAITLIST_RELAY_ENABLED", "off")]));
        assert!(!config.relay_enabled);
    }

    // ========================================================================
    // Endpoint Tests
    // ========================================================================

    #[test]
    fn test_placeholder_endpoint_is_not_configured() {
        let config = LandingConfig {
            endpoint_url: Some(ENDPOINT_PLACEHOLDER.to_string()),
            ..LandingConfig::default()
        };
        assert!(!config.has_endpoint());
    }

    #[test]
    fn test_blank_endpoint_is_not_configured() {
        let config = LandingConfig {
            endpoint_url: Some("   ".to_string()),
            ..LandingConfig::default()
        };
        assert!(!config.has_endpoint());
        assert!(!LandingConfig::default().has_endpoint());
    }

    // ========================================================================
    // Embedding Tests
    // ========================================================================

    #[test]
    fn test_json_embedding() {
        let config = LandingConfig {
            initial_waitlist_count: 10,
            relay_enabled: true,
            ..LandingConfig::default()
        };
        assert_eq!(LandingConfig::from_json(&config.to_json()), config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LandingConfig::from_json(r#"{"initial_waitlist_count": 5}"#);
        assert_eq!(config.initial_waitlist_count, 5);
        assert_eq!(config.relay_form_name, "waitlist");
    }

    #[test]
    fn test_invalid_json_falls_back_to_default() {
        assert_eq!(LandingConfig::from_json("not json"), LandingConfig::default());
    }
}
