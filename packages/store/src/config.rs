//! # Client configuration: `redpuppet.toml`
//!
//! Where the client finds its backend. The file is optional: native builds may
//! read it from the working directory, and `api::config` can fill the same
//! [`BackendConfig`] from environment variables instead.
//!
//! ```toml
//! [backend]
//! url = "https://project.supabase.co"
//! anon_key = "public-anon-key"
//! ```
//!
//! All structs derive `Default` so a missing or empty file equals the default
//! configuration (which has no backend and is rejected by the remote gateway).

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `redpuppet.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Hosted backend location and public key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project base URL, without a trailing slash.
    #[serde(default)]
    pub url: String,
    /// Public (anon) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "redpuppet.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.backend = BackendConfig::new(config.backend.url, config.backend.anon_key);
        Ok(config)
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
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(!config.backend.is_complete());
    }

    #[test]
    fn test_backend_section() {
        let config = ClientConfig::from_toml(
            r#"
            [backend]
            url = "https://demo.supabase.co/"
            anon_key = "anon"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.url, "https://demo.supabase.co");
        assert!(config.backend.is_complete());

        let again = ClientConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(again, config);
    }
}
