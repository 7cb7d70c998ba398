use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("failed to build TTS HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("no text to speak")]
    EmptyText,

    #[error("text exceeds maximum size: {len} bytes (limit: {limit} bytes)")]
    TextTooLong { len: usize, limit: usize },

    #[error("TTS request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("TTS provider returned {status} for segment {segment}")]
    Api { status: u16, segment: usize },

    #[error("TTS provider returned no audio for segment {0}")]
    EmptyAudio(usize),
}
