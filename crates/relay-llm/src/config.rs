use serde::{Deserialize, Serialize};
use std::fmt;

/// Model used for every chat completion.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Connection settings for the Gemini API.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key sent as `x-goog-api-key`. May be empty; the provider then
    /// rejects each call.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Scheme and host of the API, without the `/v1beta` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Overall request timeout. `None` leaves the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Points the client at a different host, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = LlmConfig::new("super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        assert!(!LlmConfig::new("  ").has_api_key());
        assert!(LlmConfig::new("k").has_api_key());
    }
}
