//! Deterministic tokenizers for tests
//!
//! Available in unit tests and, with the `test-utils` feature, to integration
//! tests. None of them need a real vocabulary.

use crate::error::{TokenError, TokenResult};
use crate::tokens::{TokenId, Tokenizer};

/// One token per whitespace-separated word
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn tokenize(&self, text: &str) -> TokenResult<Vec<TokenId>> {
        Ok(text.split_whitespace().map(|word| word.len()).collect())
    }
}

/// One token per character; token ids are code points
#[derive(Debug, Default, Clone, Copy)]
pub struct CharTokenizer;

impl CharTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for CharTokenizer {
    fn name(&self) -> &str {
        "char"
    }

    fn tokenize(&self, text: &str) -> TokenResult<Vec<TokenId>> {
        Ok(text.chars().map(|c| c as TokenId).collect())
    }

    fn decode(&self, tokens: &[TokenId]) -> TokenResult<String> {
        tokens
            .iter()
            .map(|&id| {
                u32::try_from(id)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| TokenError::InvalidInput(format!("invalid token id {}", id)))
            })
            .collect()
    }
}

/// Rejects every input
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingTokenizer;

impl Tokenizer for FailingTokenizer {
    fn name(&self) -> &str {
        "failing"
    }

    fn tokenize(&self, _text: &str) -> TokenResult<Vec<TokenId>> {
        Err(TokenError::InvalidInput("input rejected".to_string()))
    }
}
