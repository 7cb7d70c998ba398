//! Shared request and reply types for the voice relay.
//!
//! Every value here is request-scoped: it is built when a handler starts and
//! dropped once the HTTP response completes. Nothing is persisted.
//!
//! Wire names follow the public JSON contract (`tokensUsed`, `maxTokens`),
//! so the structs carry explicit serde renames.

use serde::{Deserialize, Serialize};

/// Default upper bound on tokens returned by the chat endpoint.
pub const DEFAULT_MAX_TOKENS: usize = 150;

/// Status string reported by the health endpoint.
pub const HEALTH_STATUS: &str = "Voice AI Agent API is running";

/// Number of characters of user or model text included in log lines.
pub const LOG_PREVIEW_CHARS: usize = 50;

/// Request body for `POST /chat/text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, forwarded verbatim to the LLM.
    pub message: String,
}

/// Response body for `POST /chat/text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The (possibly truncated) model reply.
    pub response: String,
    /// Token length of `response` before the ellipsis marker was appended.
    #[serde(rename = "tokensUsed")]
    pub tokens_used: usize,
    /// The budget applied to this reply.
    #[serde(rename = "maxTokens")]
    pub max_tokens: usize,
    /// Whether the raw reply exceeded `max_tokens` and was cut.
    pub truncated: bool,
}

/// Request body for `POST /tts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize.
    pub message: String,
}

/// Response body for `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: HEALTH_STATUS.to_string(),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_reply_uses_camel_case_wire_names() {
        let reply = ChatReply {
            response: "hi".to_string(),
            tokens_used: 1,
            max_tokens: DEFAULT_MAX_TOKENS,
            truncated: false,
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["tokensUsed"], 1);
        assert_eq!(json["maxTokens"], 150);
        assert_eq!(json["truncated"], false);
        assert!(json.get("tokens_used").is_none());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo wörld", 4), "héll");
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn health_status_default_message() {
        assert_eq!(HealthStatus::default().status, HEALTH_STATUS);
    }
}
