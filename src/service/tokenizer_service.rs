//! Authenticated tokenizer service handle
//!
//! `TokenizerService` forwards requests to a shared `ServerService` with a
//! fixed set of credentials. `ServiceTokenizer` adapts a handle to the
//! `Tokenizer` trait so a `TokenCounter` can count through the service.

use std::sync::Arc;

use crate::error::TokenResult;
use crate::service::auth::Authentication;
use crate::service::server::{
    DecodeRequest, DecodeResult, ServerService, TokenizationRequest, TokenizationResult,
};
use crate::tokens::{TokenId, Tokenizer};

/// Tokenizer service handle
#[derive(Clone)]
pub struct TokenizerService {
    service: Arc<ServerService>,
    auth: Authentication,
}

impl TokenizerService {
    pub fn new(service: Arc<ServerService>, auth: Authentication) -> Self {
        Self { service, auth }
    }

    pub fn tokenize(&self, request: &TokenizationRequest) -> TokenResult<TokenizationResult> {
        self.service.tokenize(&self.auth, request)
    }

    pub fn decode(&self, request: &DecodeRequest) -> TokenResult<DecodeResult> {
        self.service.decode(&self.auth, request)
    }

    pub fn server(&self) -> &ServerService {
        &self.service
    }
}

/// `Tokenizer` backed by a tokenizer service
#[derive(Clone)]
pub struct ServiceTokenizer {
    service: TokenizerService,
    tokenizer: String,
}

impl ServiceTokenizer {
    /// Tokenizer named `tokenizer` (an encoding or model name) on `service`
    pub fn new(service: TokenizerService, tokenizer: impl Into<String>) -> Self {
        Self {
            service,
            tokenizer: tokenizer.into(),
        }
    }
}

impl Tokenizer for ServiceTokenizer {
    fn name(&self) -> &str {
        &self.tokenizer
    }

    fn tokenize(&self, text: &str) -> TokenResult<Vec<TokenId>> {
        let request = TokenizationRequest::new(text, self.tokenizer.as_str());
        Ok(self.service.tokenize(&request)?.tokens)
    }

    fn decode(&self, tokens: &[TokenId]) -> TokenResult<String> {
        let request = DecodeRequest {
            tokens: tokens.to_vec(),
            tokenizer: self.tokenizer.clone(),
        };
        Ok(self.service.decode(&request)?.text)
    }
}
