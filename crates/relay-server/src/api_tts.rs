//! Speech relay handler.

use crate::{api::ApiError, AppState};
use axum::{
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, Extension, Json},
    http::header,
    response::{IntoResponse, Response},
};
use relay_types::{preview, SpeechRequest, LOG_PREVIEW_CHARS};
use relay_voice::AUDIO_MPEG;
use std::convert::Infallible;
use std::sync::Arc;

/// Handler for `POST /tts`.
///
/// The clip is synthesized in full before the first byte is sent, so a
/// provider failure still yields a 500 instead of a cut-off stream.
pub async fn tts_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    tracing::info!(
        text = preview(&request.message, LOG_PREVIEW_CHARS),
        "TTS request received"
    );

    let clip = state.tts.synthesize(&request.message).await.map_err(|e| {
        tracing::error!(error = %e, "speech relay failed");
        ApiError::from(e)
    })?;

    tracing::info!(
        bytes = clip.len(),
        segments = clip.segments().len(),
        "TTS audio generated"
    );

    let chunks = clip
        .into_segments()
        .into_iter()
        .map(Ok::<Bytes, Infallible>);
    let body = Body::from_stream(futures_util::stream::iter(chunks));

    Ok(([(header::CONTENT_TYPE, AUDIO_MPEG)], body).into_response())
}
