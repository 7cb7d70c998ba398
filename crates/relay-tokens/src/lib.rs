//! Token budgeting for model replies.
//!
//! Replies from the LLM are measured with a BPE tokenizer table bundled by
//! `tiktoken-rs` and, when they exceed the configured budget, cut to a token
//! prefix followed by `"..."`. Truncation happens after the full reply has
//! been received, so it bounds response size but not upstream billing.
//!
//! If no tokenizer table is available the budgeter estimates four characters
//! per token. That estimate only feeds the reported count; text is never cut
//! on an estimate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use relay_tokens::{Encoding, TokenBudgeter};
//!
//! let budgeter = TokenBudgeter::new(Encoding::Cl100kBase)?;
//! let result = budgeter.truncate(&reply, 150);
//! assert!(result.token_count <= 150);
//! ```

mod budget;
mod encoding;
mod error;

pub use budget::{
    estimate_tokens, TokenBudgeter, Truncation, APPROX_CHARS_PER_TOKEN, TRUNCATION_MARKER,
};
pub use encoding::Encoding;
pub use error::TokenError;
