//! # Client configuration: `lessons.toml`
//!
//! Defines the TOML file the web package embeds at build time to learn where
//! the backend and the identity provider live, and how hard the session
//! bridge should retry the token exchange.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//!
//! [identity]
//! endpoint = "https://identitytoolkit.googleapis.com/v1"
//! api_key = ""
//! google_client_id = ""
//! redirect_uri = "http://localhost:8080/auth/callback"
//!
//! [session]
//! token_attempts = 3       # total attempts, not retries
//! token_backoff_ms = 500   # delay before attempt n+1 is n * this
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`LessonsConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Base URL of the REST backend. |
//! | [`IdentityConfig`] | Identity provider REST endpoint, API key, and Google OAuth client for federated sign-in. |
//! | [`SessionConfig`] | Token exchange retry bounds. |
//!
//! Every section has defaults, so a missing or empty file is equivalent to the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `lessons.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonsConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// REST backend configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Identity provider configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    /// OAuth client used for "Continue with Google". Empty disables the button.
    #[serde(default)]
    pub google_client_id: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

fn default_identity_endpoint() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_redirect_uri() -> String {
    "http://localhost:8080/auth/callback".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_identity_endpoint(),
            api_key: String::new(),
            google_client_id: String::new(),
            redirect_uri: default_redirect_uri(),
        }
    }
}

/// Token exchange retry configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_attempts")]
    pub token_attempts: u32,
    #[serde(default = "default_token_backoff_ms")]
    pub token_backoff_ms: u64,
}

fn default_token_attempts() -> u32 {
    3
}

fn default_token_backoff_ms() -> u64 {
    500
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_attempts: default_token_attempts(),
            token_backoff_ms: default_token_backoff_ms(),
        }
    }
}

impl LessonsConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: String) -> Self {
        Self {
            api: ApiConfig { base_url },
            ..Self::default()
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "lessons.toml"
    }

    /// Backend origin with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = LessonsConfig::from_toml("").unwrap();
        assert_eq!(config, LessonsConfig::default());
        assert_eq!(config.base_url(), "http://localhost:5000");
        assert_eq!(config.session.token_attempts, 3);
        assert_eq!(config.session.token_backoff_ms, 500);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = LessonsConfig::from_toml(
            r#"
            [api]
            base_url = "https://lessons.example.com/"

            [session]
            token_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "https://lessons.example.com");
        assert_eq!(config.session.token_attempts, 5);
        assert_eq!(config.session.token_backoff_ms, 500);
        assert_eq!(config.identity, IdentityConfig::default());
    }

    #[test]
    fn test_serialize_round_trips() {
        let mut config = LessonsConfig::new("https://api.test".to_string());
        config.identity.api_key = "k-123".to_string();
        let text = config.to_toml().unwrap();
        assert!(text.contains("base_url = \"https://api.test\""));
        assert!(text.contains("api_key = \"k-123\""));

        let parsed = LessonsConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
