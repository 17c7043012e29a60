//! Configuration management for Tokengauge
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::request::DEFAULT_MODEL;
use crate::tokens::TruncationPolicy;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Model whose vocabulary and context window are used
    pub model: String,
    /// Context window override; the model profile's window when unset
    pub context_window: Option<usize>,
    /// How oversized prompts are cut
    pub truncation: TruncationPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            model: env::var("TOKENGAUGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),

            context_window: env::var("TOKENGAUGE_CONTEXT_WINDOW")
                .ok()
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("Invalid TOKENGAUGE_CONTEXT_WINDOW")?,

            truncation: env::var("TOKENGAUGE_TRUNCATION")
                .unwrap_or_else(|_| "words".to_string())
                .parse()
                .context("Invalid TOKENGAUGE_TRUNCATION")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            context_window: None,
            truncation: TruncationPolicy::default(),
        }
    }
}
