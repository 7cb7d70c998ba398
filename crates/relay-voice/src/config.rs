use serde::{Deserialize, Serialize};

/// Host serving the `translate_tts` endpoint.
pub const DEFAULT_TTS_BASE_URL: &str = "https://translate.google.com";

/// Spoken language for every synthesis request.
pub const DEFAULT_TTS_LANG: &str = "en";

fn default_base_url() -> String {
    DEFAULT_TTS_BASE_URL.to_string()
}

fn default_lang() -> String {
    DEFAULT_TTS_LANG.to_string()
}

/// Settings for the text-to-speech provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// IETF language tag passed as `tl`.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Slow speaking rate. Off by default.
    #[serde(default)]
    pub slow: bool,
    /// Per-request timeout. `None` leaves the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lang: default_lang(),
            slow: false,
            timeout_secs: None,
        }
    }
}

impl TtsConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Value of the provider's `ttsspeed` parameter.
    pub fn speed_param(&self) -> &'static str {
        if self.slow {
            "0.3"
        } else {
            "1"
        }
    }
}
