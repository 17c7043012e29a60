//! In-process tokenizer service
//!
//! A `ServerService` owns a scratch directory and a cache of tokenizers and
//! checks credentials; a `TokenizerService` is an authenticated handle to it.

pub mod auth;
pub mod server;
pub mod tokenizer_service;

pub use auth::Authentication;
pub use server::{DecodeRequest, DecodeResult, ServerService, TokenizationRequest, TokenizationResult};
pub use tokenizer_service::{ServiceTokenizer, TokenizerService};
