//! Request and completion types
//!
//! A `Request` carries the prompt and generation parameters sent to a model;
//! a `Sequence` is one realized completion with its per-token log-probabilities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Model used when a request does not name one
pub const DEFAULT_MODEL: &str = "openai/davinci";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    1.0
}

fn default_num_completions() -> usize {
    1
}

fn default_max_tokens() -> usize {
    100
}

fn default_top_k_per_token() -> usize {
    1
}

/// A generation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    /// Model name, optionally prefixed with its organization (`openai/davinci`)
    #[serde(default = "default_model")]
    pub model: String,
    /// Prompt text
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Number of completions to generate
    #[serde(default = "default_num_completions")]
    pub num_completions: usize,
    /// Generation budget per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Number of alternatives to report per generated token
    #[serde(default = "default_top_k_per_token")]
    pub top_k_per_token: usize,
    #[serde(default)]
    pub stop_sequences: Vec<String>,
    /// Whether the prompt is echoed back in front of each completion
    #[serde(default)]
    pub echo_prompt: bool,
}

impl Request {
    /// Create a request for `prompt` with default generation parameters
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_num_completions(mut self, num_completions: usize) -> Self {
        self.num_completions = num_completions;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            model: default_model(),
            prompt: String::new(),
            temperature: default_temperature(),
            num_completions: default_num_completions(),
            max_tokens: default_max_tokens(),
            top_k_per_token: default_top_k_per_token(),
            stop_sequences: Vec::new(),
            echo_prompt: false,
        }
    }
}

/// A single generated token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// Text fragment of the token
    pub text: String,
    pub logprob: f64,
    /// Top-k alternative fragments and their log-probabilities
    #[serde(default)]
    pub top_logprobs: HashMap<String, f64>,
}

impl Token {
    pub fn new(text: impl Into<String>, logprob: f64) -> Self {
        Self {
            text: text.into(),
            logprob,
            top_logprobs: HashMap::new(),
        }
    }

    pub fn with_top_logprob(mut self, text: impl Into<String>, logprob: f64) -> Self {
        self.top_logprobs.insert(text.into(), logprob);
        self
    }
}

/// A completion candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sequence {
    /// Full completion text
    pub text: String,
    /// Aggregate log-probability of the completion
    pub logprob: f64,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl Sequence {
    pub fn new(text: impl Into<String>, logprob: f64, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            logprob,
            tokens,
        }
    }
}
