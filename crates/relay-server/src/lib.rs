//! Voice relay server library logic.

pub mod api;
pub mod api_chat;
pub mod api_tts;
pub mod config;
pub mod logging;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Extension, Json, Router,
};
use relay_llm::{GeminiClient, LlmError};
use relay_tokens::TokenBudgeter;
use relay_types::HealthStatus;
use relay_voice::{TtsService, VoiceError};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
///
/// Built once at startup and never mutated, so handlers share it without
/// locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gemini client carrying the API credential.
    pub llm: Arc<GeminiClient>,
    /// Tokenizer used to enforce the reply budget.
    pub budgeter: Arc<TokenBudgeter>,
    /// Upper bound on tokens returned by `/chat/text`.
    pub max_tokens: usize,
    /// Text-to-speech client.
    pub tts: Arc<TtsService>,
    /// The one origin allowed to make cross-origin calls.
    pub cors_origin: String,
}

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Voice(#[from] VoiceError),
}

impl AppState {
    pub fn new(
        llm: GeminiClient,
        budgeter: TokenBudgeter,
        max_tokens: usize,
        tts: TtsService,
        cors_origin: impl Into<String>,
    ) -> Self {
        Self {
            llm: Arc::new(llm),
            budgeter: Arc::new(budgeter),
            max_tokens,
            tts: Arc::new(tts),
            cors_origin: cors_origin.into(),
        }
    }

    /// Builds every collaborator from loaded configuration.
    ///
    /// An unknown or unloadable tokenizer degrades to approximate counting
    /// rather than failing startup.
    pub fn from_config(config: &config::Config) -> Result<Self, StartupError> {
        let llm = GeminiClient::new(config.llm.clone())?;
        let budgeter = TokenBudgeter::from_name_or_approximate(&config.tokens.encoding);
        let tts = TtsService::new(config.tts.clone())?;

        Ok(Self::new(
            llm,
            budgeter,
            config.tokens.max_tokens,
            tts,
            config.cors.allowed_origin.trim(),
        ))
    }
}

/// Maximum request body size (1 MiB). Chat and TTS payloads are short text.
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Health check handler for `GET /`.
async fn health() -> Json<HealthStatus> {
    tracing::info!("health check endpoint called");
    Json(HealthStatus::default())
}

/// Cross-origin policy: one exact origin, any method or header it asks for,
/// credentials allowed.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(AllowOrigin::exact(value)),
        Err(_) => {
            tracing::warn!(
                origin,
                "CORS origin is not a valid header value, cross-origin requests will be blocked"
            );
            layer
        }
    }
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/", get(health))
        .route("/chat/text", post(api_chat::chat_text_handler))
        .route("/tts", post(api_tts::tts_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(Arc::new(state)))
}
