//! Token counter implementation
//!
//! Counts prompt and completion tokens, estimates the worst-case token usage
//! of a request before generation, and fits prompts into a model's context
//! window. Uses tiktoken-rs through the `Tokenizer` trait.

use std::sync::Arc;

use crate::config::Config;
use crate::error::TokenResult;
use crate::metrics::{record_tokens, record_truncation};
use crate::request::{Request, Sequence};
use crate::tokens::models::{ModelProfile, DEFAULT_CONTEXT_WINDOW};
use crate::tokens::tokenizer::{BpeTokenizer, Tokenizer};
use crate::tokens::truncate::{longest_fitting_prefix, TruncationPolicy};

/// Token counter bound to one vocabulary and one context window
///
/// The counter never mutates after construction, so one instance can be
/// shared across threads behind an `Arc` (or cloned cheaply).
#[derive(Clone)]
pub struct TokenCounter {
    tokenizer: Arc<dyn Tokenizer>,
    context_window: usize,
    policy: TruncationPolicy,
}

impl TokenCounter {
    /// Create a counter with the GPT-2 vocabulary and a 2049-token window
    pub fn new() -> TokenResult<Self> {
        Ok(Self::with_tokenizer(
            Arc::new(BpeTokenizer::gpt2()?),
            DEFAULT_CONTEXT_WINDOW,
        ))
    }

    /// Create a counter from any tokenizer
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>, context_window: usize) -> Self {
        Self {
            tokenizer,
            context_window,
            policy: TruncationPolicy::default(),
        }
    }

    /// Create a counter with the vocabulary and window of `model`
    pub fn for_model(model: &str) -> TokenResult<Self> {
        let profile = ModelProfile::resolve(model);
        Ok(Self::with_tokenizer(
            Arc::new(BpeTokenizer::new(profile.encoding)?),
            profile.context_window,
        ))
    }

    /// Create a counter from the application configuration
    pub fn from_config(config: &Config) -> TokenResult<Self> {
        let profile = ModelProfile::resolve(&config.model);
        let tokenizer = Arc::new(BpeTokenizer::new(profile.encoding)?);
        let context_window = config.context_window.unwrap_or(profile.context_window);
        Ok(Self::with_tokenizer(tokenizer, context_window).with_truncation_policy(config.truncation))
    }

    pub fn with_truncation_policy(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Maximum number of prompt plus completion tokens
    pub fn context_window(&self) -> usize {
        self.context_window
    }

    pub fn truncation_policy(&self) -> TruncationPolicy {
        self.policy
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Count the tokens of the prompt and of every completion
    ///
    /// Each completion is counted by tokenizing its text, not by the length
    /// of its token list. The number of completions does not need to match
    /// `request.num_completions`.
    pub fn count_tokens(&self, request: &Request, completions: &[Sequence]) -> TokenResult<usize> {
        let prompt_tokens = self.tokenizer.count(&request.prompt)?;

        let mut completion_tokens = 0;
        for sequence in completions {
            completion_tokens += self.tokenizer.count(&sequence.text)?;
        }

        record_tokens("prompt", prompt_tokens as u64, self.tokenizer.name());
        record_tokens("completion", completion_tokens as u64, self.tokenizer.name());

        Ok(prompt_tokens + completion_tokens)
    }

    /// Worst-case token usage of a request before generation
    ///
    /// Prompt tokens plus `max_tokens` for each requested completion.
    pub fn estimate_tokens(&self, request: &Request) -> TokenResult<usize> {
        let prompt_tokens = self.tokenizer.count(&request.prompt)?;
        let completion_budget = request.num_completions.saturating_mul(request.max_tokens);
        Ok(prompt_tokens.saturating_add(completion_budget))
    }

    /// Whether `text` plus `expected_completion_token_count` tokens fit the
    /// context window
    pub fn fits_within_context_window(
        &self,
        text: &str,
        expected_completion_token_count: usize,
    ) -> TokenResult<bool> {
        let prompt_tokens = self.tokenizer.count(text)?;
        Ok(prompt_tokens.saturating_add(expected_completion_token_count) <= self.context_window)
    }

    /// Whether `text` alone fits the context window
    pub fn fits(&self, text: &str) -> TokenResult<bool> {
        self.fits_within_context_window(text, 0)
    }

    /// Cut `text` from the end until it fits the context window
    ///
    /// Returns `text` unchanged when it already fits.
    pub fn truncate(&self, text: &str) -> TokenResult<String> {
        if self.fits(text)? {
            return Ok(text.to_string());
        }

        let truncated = longest_fitting_prefix(text, self.policy, |prefix| self.fits(prefix))?;

        tracing::debug!(
            tokenizer = self.tokenizer.name(),
            context_window = self.context_window,
            original_len = text.len(),
            truncated_len = truncated.len(),
            "Truncated text to fit context window"
        );
        record_truncation(self.tokenizer.name());

        Ok(truncated.to_string())
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("tokenizer", &self.tokenizer.name())
            .field("context_window", &self.context_window)
            .field("policy", &self.policy)
            .finish()
    }
}
