//! Supported tokenizer tables.

use crate::error::TokenError;
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::CoreBPE;

/// A named BPE table bundled with `tiktoken-rs`.
///
/// Gemini's own tokenizer is not published, so `cl100k_base` stands in as
/// the documented counting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Cl100kBase,
    O200kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl Encoding {
    /// Returns the canonical table name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cl100kBase => "cl100k_base",
            Self::O200kBase => "o200k_base",
            Self::P50kBase => "p50k_base",
            Self::P50kEdit => "p50k_edit",
            Self::R50kBase => "r50k_base",
        }
    }

    /// Builds the BPE table for this encoding.
    pub fn load(self) -> Result<CoreBPE, TokenError> {
        let loaded = match self {
            Self::Cl100kBase => tiktoken_rs::cl100k_base(),
            Self::O200kBase => tiktoken_rs::o200k_base(),
            Self::P50kBase => tiktoken_rs::p50k_base(),
            Self::P50kEdit => tiktoken_rs::p50k_edit(),
            Self::R50kBase => tiktoken_rs::r50k_base(),
        };
        loaded.map_err(|e| TokenError::Load {
            encoding: self.as_str(),
            message: e.to_string(),
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cl100k_base" => Ok(Self::Cl100kBase),
            "o200k_base" => Ok(Self::O200kBase),
            "p50k_base" => Ok(Self::P50kBase),
            "p50k_edit" => Ok(Self::P50kEdit),
            "r50k_base" => Ok(Self::R50kBase),
            other => Err(TokenError::UnknownEncoding(other.to_string())),
        }
    }
}
