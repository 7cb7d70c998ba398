//! Prefix truncation of model replies against a token budget.

use crate::encoding::Encoding;
use crate::error::TokenError;
use std::fmt;
use std::sync::Arc;
use tiktoken_rs::CoreBPE;

/// Marker appended to a reply that was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Characters per token assumed when no tokenizer table is available.
pub const APPROX_CHARS_PER_TOKEN: usize = 4;

/// Outcome of applying a budget to one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// The text to return to the caller.
    pub text: String,
    /// Token count of `text` without the marker, or `max_tokens` when cut.
    pub token_count: usize,
    /// Whether the input exceeded the budget and was cut.
    pub truncated: bool,
    /// Whether `token_count` is a character-ratio estimate.
    pub approximate: bool,
}

/// Enforces an upper bound on the number of tokens in a reply.
///
/// Built once at startup and shared read-only by every request. Cloning is
/// cheap; the BPE table sits behind an `Arc`.
#[derive(Clone)]
pub struct TokenBudgeter {
    encoding: Encoding,
    bpe: Option<Arc<CoreBPE>>,
}

impl fmt::Debug for TokenBudgeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenBudgeter")
            .field("encoding", &self.encoding)
            .field("exact", &self.is_exact())
            .finish()
    }
}

impl TokenBudgeter {
    /// Loads the table for `encoding`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Load` if the table cannot be built.
    pub fn new(encoding: Encoding) -> Result<Self, TokenError> {
        let bpe = encoding.load()?;
        Ok(Self {
            encoding,
            bpe: Some(Arc::new(bpe)),
        })
    }

    /// A budgeter with no table: counts are estimated and text is never cut.
    pub fn approximate(encoding: Encoding) -> Self {
        Self {
            encoding,
            bpe: None,
        }
    }

    /// Resolves an encoding by name, degrading to [`TokenBudgeter::approximate`]
    /// when the name is unknown or its table fails to load.
    pub fn from_name_or_approximate(name: &str) -> Self {
        let encoding = match name.parse::<Encoding>() {
            Ok(encoding) => encoding,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to approximate token counting");
                return Self::approximate(Encoding::default());
            }
        };

        match Self::new(encoding) {
            Ok(budgeter) => budgeter,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to approximate token counting");
                Self::approximate(encoding)
            }
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns `true` when counts come from a real tokenizer table.
    pub fn is_exact(&self) -> bool {
        self.bpe.is_some()
    }

    /// Counts the tokens in `text`, estimating when no table is loaded.
    pub fn count(&self, text: &str) -> usize {
        match &self.bpe {
            Some(bpe) => bpe.encode_ordinary(text).len(),
            None => estimate_tokens(text),
        }
    }

    /// Applies `max_tokens` to `text`.
    ///
    /// Text within budget is returned unchanged. Longer text keeps its first
    /// `max_tokens` tokens, loses trailing whitespace and gains
    /// [`TRUNCATION_MARKER`].
    pub fn truncate(&self, text: &str, max_tokens: usize) -> Truncation {
        let Some(bpe) = &self.bpe else {
            return unchanged(text, estimate_tokens(text), true);
        };

        let tokens = bpe.encode_ordinary(text);
        if tokens.len() <= max_tokens {
            return unchanged(text, tokens.len(), false);
        }

        // A cut inside a multi-byte character leaves a partial sequence at the
        // end; it decodes to U+FFFD rather than shortening the prefix.
        let bytes: Vec<u8> = bpe
            ._decode_native_and_split(tokens[..max_tokens].to_vec())
            .flatten()
            .collect();
        let prefix = String::from_utf8_lossy(&bytes);

        tracing::debug!(
            raw_tokens = tokens.len(),
            max_tokens,
            "truncated reply to token budget"
        );

        let mut cut = prefix.trim_end().to_string();
        cut.push_str(TRUNCATION_MARKER);
        Truncation {
            text: cut,
            token_count: max_tokens,
            truncated: true,
            approximate: false,
        }
    }
}

/// Character-ratio token estimate, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(APPROX_CHARS_PER_TOKEN)
}

fn unchanged(text: &str, token_count: usize, approximate: bool) -> Truncation {
    Truncation {
        text: text.to_string(),
        token_count,
        truncated: false,
        approximate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budgeter() -> TokenBudgeter {
        TokenBudgeter::new(Encoding::Cl100kBase).expect("cl100k table should load")
    }

    #[test]
    fn estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        // Characters, not bytes.
        assert_eq!(estimate_tokens("éééé"), 1);
    }

    #[test]
    fn zero_budget_leaves_only_marker() {
        let result = budgeter().truncate("hello there", 0);
        assert_eq!(result.text, TRUNCATION_MARKER);
        assert_eq!(result.token_count, 0);
        assert!(result.truncated);
    }

    #[test]
    fn multibyte_cut_keeps_exact_budget() {
        let b = budgeter();
        let text = "日本語のテキストは複数のバイトで構成されています。🦀🦀🦀".repeat(40);
        assert!(b.count(&text) > 150);
        for max in 1..=150 {
            let result = b.truncate(&text, max);
            assert!(result.truncated);
            assert_eq!(result.token_count, max, "cut at {max}");
            assert!(result.text.ends_with(TRUNCATION_MARKER));
            // A split character only ever shows up at the end of the cut.
            let body = result
                .text
                .trim_end_matches(TRUNCATION_MARKER)
                .trim_end_matches('\u{FFFD}');
            assert!(!body.contains('\u{FFFD}'), "cut at {max} has inner replacement");
            assert!(text.starts_with(body), "cut at {max} is not a prefix");
        }
    }

    #[test]
    fn approximate_mode_never_cuts() {
        let b = TokenBudgeter::approximate(Encoding::Cl100kBase);
        let text = "word ".repeat(400);
        let result = b.truncate(&text, 10);
        assert_eq!(result.text, text);
        assert!(!result.truncated);
        assert!(result.approximate);
        assert_eq!(result.token_count, 500);
    }

    #[test]
    fn unknown_name_degrades_to_approximate() {
        let b = TokenBudgeter::from_name_or_approximate("not_a_table");
        assert!(!b.is_exact());
        assert_eq!(b.encoding(), Encoding::Cl100kBase);
    }
}
