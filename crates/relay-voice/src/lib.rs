//! Text-to-speech relay for the voice relay server.
//!
//! Forwards text to the Google Translate TTS endpoint (the service gTTS
//! wraps) with fixed parameters: English, normal speaking rate. The endpoint
//! renders at most 100 characters per request, so longer text is split into
//! segments whose MPEG payloads are returned in order.
//!
//! Audio is buffered in full before it is handed back, so a failure in any
//! segment surfaces as an error rather than a truncated stream.

pub mod config;
pub mod error;
pub mod segment;
pub mod tts;

pub use config::{TtsConfig, DEFAULT_TTS_BASE_URL, DEFAULT_TTS_LANG};
pub use error::VoiceError;
pub use segment::{split_text, MAX_SEGMENT_CHARS};
pub use tts::{AudioClip, TtsService, AUDIO_MPEG, MAX_TTS_INPUT_BYTES};
