use crate::config::LlmConfig;
use crate::error::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Finish reasons that mean the provider withheld the answer.
const BLOCKING_FINISH_REASONS: &[&str] =
    &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT"];

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    /// Thinking models interleave reasoning parts that are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Single-turn, non-streaming client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl GeminiClient {
    /// Builds a client from `config`.
    ///
    /// A missing API key is not an error here; the provider rejects the
    /// call when it is made.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(LlmError::Client)?;
        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn has_api_key(&self) -> bool {
        self.config.has_api_key()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends `prompt` verbatim as one user turn and returns the full reply text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        extract_text(parsed)
    }
}

/// Joins the answer parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::Blocked(reason));
        }
        return Err(LlmError::MalformedResponse(
            "response contained no candidates".to_string(),
        ));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_default();
        if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) {
            return Err(LlmError::Blocked(reason));
        }
        return Err(LlmError::MalformedResponse(
            "candidate contained no text".to_string(),
        ));
    }

    Ok(text)
}
