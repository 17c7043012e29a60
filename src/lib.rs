//! Tokengauge - token accounting for language-model evaluation
//!
//! This library counts prompt and completion tokens, estimates the worst-case
//! token usage of a request, checks prompts against a model's context window
//! and truncates prompts that do not fit.
//!
//! ```no_run
//! use tokengauge::{Request, TokenCounter};
//!
//! let counter = TokenCounter::new()?;
//! let request = Request::new("The Center for Research on Foundation Models")
//!     .with_num_completions(3)
//!     .with_max_tokens(100);
//! let budget = counter.estimate_tokens(&request)?;
//! assert!(budget >= 300);
//! # Ok::<(), tokengauge::TokenError>(())
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod request;
pub mod service;
pub mod tokens;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use crate::config::Config;
pub use crate::error::{TokenError, TokenResult};
pub use crate::request::{Request, Sequence, Token};
pub use crate::service::{Authentication, ServerService, ServiceTokenizer, TokenizerService};
pub use crate::tokens::{
    BpeTokenizer, Encoding, ModelProfile, TokenCounter, TokenId, Tokenizer, TruncationPolicy,
    DEFAULT_CONTEXT_WINDOW,
};
