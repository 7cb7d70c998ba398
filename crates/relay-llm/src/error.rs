use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("failed to build LLM HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("LLM response blocked: {0}")]
    Blocked(String),
}
