//! Chat relay handler.

use crate::{api::ApiError, AppState};
use axum::extract::{rejection::JsonRejection, Extension, Json};
use relay_types::{preview, ChatReply, ChatRequest, LOG_PREVIEW_CHARS};
use std::sync::Arc;

/// Handler for `POST /chat/text`.
///
/// Forwards the message to the LLM unmodified, then applies the token budget
/// to the full reply. Provider failures are not retried.
pub async fn chat_text_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload?;

    tracing::info!(
        text = preview(&request.message, LOG_PREVIEW_CHARS),
        "received text message"
    );

    let reply = state.llm.generate(&request.message).await.map_err(|e| {
        tracing::error!(error = %e, model = state.llm.model(), "chat relay failed");
        ApiError::from(e)
    })?;

    tracing::info!(
        response = preview(&reply, LOG_PREVIEW_CHARS),
        "AI response generated"
    );

    let budgeted = state.budgeter.truncate(&reply, state.max_tokens);
    if budgeted.approximate {
        tracing::warn!(
            tokens = budgeted.token_count,
            "tokenizer unavailable, token count is an estimate"
        );
    }
    if budgeted.truncated {
        tracing::info!(max_tokens = state.max_tokens, "reply truncated to token budget");
    }

    Ok(Json(ChatReply {
        response: budgeted.text,
        tokens_used: budgeted.token_count,
        max_tokens: state.max_tokens,
        truncated: budgeted.truncated,
    }))
}
