//! LLM provider client for the voice relay.
//!
//! Wraps the Gemini `generateContent` REST call: one user turn in, the full
//! reply text out. There is no streaming, no conversation history and no
//! retry; every failure is returned to the caller as an [`LlmError`].

pub mod client;
pub mod config;
pub mod error;

pub use client::GeminiClient;
pub use config::{LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::LlmError;
