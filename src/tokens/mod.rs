//! Token counting module
//!
//! Provides token counting, estimation and truncation using tiktoken-rs.

pub mod counter;
pub mod models;
pub mod tokenizer;
pub mod truncate;

pub use counter::TokenCounter;
pub use models::{Encoding, ModelProfile, DEFAULT_CONTEXT_WINDOW};
pub use tokenizer::{BpeTokenizer, TokenId, Tokenizer};
pub use truncate::TruncationPolicy;
