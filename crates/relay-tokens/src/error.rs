//! Error types for the token budgeter.

/// Errors raised while loading or applying a tokenizer table.
///
/// None of these reach an HTTP caller: the budgeter degrades to a
/// character-ratio estimate instead.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The configured encoding name is not one we ship a table for.
    #[error("unknown token encoding: {0}")]
    UnknownEncoding(String),

    /// The BPE table could not be built.
    #[error("failed to load {encoding} table: {message}")]
    Load {
        encoding: &'static str,
        message: String,
    },
}
