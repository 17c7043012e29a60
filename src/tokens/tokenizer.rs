//! Tokenizer abstraction
//!
//! The counter only needs one capability from a vocabulary: split text into
//! an ordered list of token ids. `BpeTokenizer` provides it with tiktoken-rs.

use tiktoken_rs::CoreBPE;

use crate::error::{TokenError, TokenResult};
use crate::tokens::models::{Encoding, ModelProfile};

/// Identifier of a token in a vocabulary
pub type TokenId = usize;

/// Splits text into the subword units of a fixed vocabulary
///
/// Implementations must be deterministic and must not enforce any length
/// limit of their own; limits are applied by the `TokenCounter`.
pub trait Tokenizer: Send + Sync {
    /// Name of the vocabulary, for logging
    fn name(&self) -> &str;

    /// Tokenize `text` into an ordered sequence of token ids
    fn tokenize(&self, text: &str) -> TokenResult<Vec<TokenId>>;

    /// Number of tokens in `text`
    fn count(&self, text: &str) -> TokenResult<usize> {
        Ok(self.tokenize(text)?.len())
    }

    /// Turn token ids back into text
    fn decode(&self, _tokens: &[TokenId]) -> TokenResult<String> {
        Err(TokenError::Unsupported(format!(
            "tokenizer '{}' cannot decode",
            self.name()
        )))
    }
}

/// Byte-pair-encoding tokenizer backed by tiktoken-rs
pub struct BpeTokenizer {
    encoding: Encoding,
    bpe: CoreBPE,
}

impl BpeTokenizer {
    /// Create a tokenizer for the given encoding
    pub fn new(encoding: Encoding) -> TokenResult<Self> {
        Ok(Self {
            encoding,
            bpe: encoding.load()?,
        })
    }

    /// GPT-2 vocabulary
    pub fn gpt2() -> TokenResult<Self> {
        Self::new(Encoding::R50kBase)
    }

    /// Tokenizer for a model, falling back to GPT-2 for unknown models
    pub fn for_model(model: &str) -> TokenResult<Self> {
        Self::new(ModelProfile::resolve(model).encoding)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl Tokenizer for BpeTokenizer {
    fn name(&self) -> &str {
        self.encoding.as_str()
    }

    fn tokenize(&self, text: &str) -> TokenResult<Vec<TokenId>> {
        Ok(self.bpe.encode_with_special_tokens(text))
    }

    fn decode(&self, tokens: &[TokenId]) -> TokenResult<String> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| TokenError::InvalidInput(format!("cannot decode tokens: {}", e)))
    }
}

impl std::fmt::Debug for BpeTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BpeTokenizer")
            .field("encoding", &self.encoding)
            .finish()
    }
}
