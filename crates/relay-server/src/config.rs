//! Server configuration loading from file and environment variables.

use axum::http::HeaderValue;
use relay_llm::LlmConfig;
use relay_types::DEFAULT_MAX_TOKENS;
use relay_voice::TtsConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Cross-origin policy.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Gemini connection and credential.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Reply token budget.
    #[serde(default)]
    pub tokens: TokenConfig,

    /// Text-to-speech provider.
    #[serde(default)]
    pub tts: TtsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// The single browser origin allowed to call the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

/// Token budget applied to chat replies.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Tokenizer table name, e.g. `cl100k_base`.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "relay_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// File that receives a copy of every log line. Blank disables it.
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

impl LoggingConfig {
    /// The log file to write, if one is configured and not blank.
    pub fn file_path(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.trim().is_empty())
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

fn default_encoding() -> String {
    "cl100k_base".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log file written in the working directory unless configured away.
pub const DEFAULT_LOG_FILE: &str = "voice_ai_agent.log";

fn default_log_file() -> Option<String> {
    Some(DEFAULT_LOG_FILE.to_string())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            encoding: default_encoding(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: default_log_file(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The CORS origin is not a usable header value.
    #[error("invalid CORS origin: {0:?}")]
    InvalidOrigin(String),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `RELAY_HOST` overrides `server.host`
/// - `RELAY_PORT` overrides `server.port`
/// - `RELAY_CORS_ORIGIN` overrides `cors.allowed_origin`
/// - `GEMINI_API_KEY` overrides `llm.api_key`
/// - `RELAY_LLM_MODEL` overrides `llm.model`
/// - `RELAY_LLM_BASE_URL` overrides `llm.base_url`
/// - `RELAY_MAX_TOKENS` overrides `tokens.max_tokens`
/// - `RELAY_TOKEN_ENCODING` overrides `tokens.encoding`
/// - `RELAY_TTS_BASE_URL` overrides `tts.base_url`
/// - `RELAY_LOG_LEVEL` overrides `logging.level`
/// - `RELAY_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `RELAY_LOG_FILE` overrides `logging.file`
///
/// A missing `GEMINI_API_KEY` is not an error; chat calls fail later at
/// the provider.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, or
/// if the resulting CORS origin is invalid.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

/// Applies overrides from `lookup`, which maps a variable name to its value.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("RELAY_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("RELAY_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(origin) = lookup("RELAY_CORS_ORIGIN") {
        config.cors.allowed_origin = origin;
    }
    if let Some(key) = lookup("GEMINI_API_KEY") {
        config.llm.api_key = key;
    }
    if let Some(model) = lookup("RELAY_LLM_MODEL") {
        config.llm.model = model;
    }
    if let Some(url) = lookup("RELAY_LLM_BASE_URL") {
        config.llm.base_url = url;
    }
    if let Some(max) = lookup("RELAY_MAX_TOKENS") {
        if let Ok(parsed) = max.parse() {
            config.tokens.max_tokens = parsed;
        }
    }
    if let Some(encoding) = lookup("RELAY_TOKEN_ENCODING") {
        config.tokens.encoding = encoding;
    }
    if let Some(url) = lookup("RELAY_TTS_BASE_URL") {
        config.tts.base_url = url;
    }
    if let Some(level) = lookup("RELAY_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("RELAY_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(file) = lookup("RELAY_LOG_FILE") {
        config.logging.file = Some(file);
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let origin = config.cors.allowed_origin.trim();
    if origin.is_empty() || HeaderValue::from_str(origin).is_err() {
        return Err(ConfigError::InvalidOrigin(
            config.cors.allowed_origin.clone(),
        ));
    }
    Ok(())
}
