//! Model profiles
//!
//! Maps model names to the BPE encoding they were trained with and the size
//! of their context window.

use std::fmt;
use std::str::FromStr;

use tiktoken_rs::CoreBPE;

use crate::error::{TokenError, TokenResult};

/// Context window of the GPT-2 era OpenAI models (prompt + completion)
pub const DEFAULT_CONTEXT_WINDOW: usize = 2049;

/// BPE vocabularies supported by the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// GPT-2 / GPT-3 vocabulary
    R50kBase,
    /// Codex and text-davinci-002/003 vocabulary
    P50kBase,
    /// GPT-3.5 / GPT-4 vocabulary
    Cl100kBase,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::R50kBase => "r50k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::Cl100kBase => "cl100k_base",
        }
    }

    /// Build the BPE for this encoding
    pub fn load(&self) -> TokenResult<CoreBPE> {
        let bpe = match self {
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
        };
        bpe.map_err(|e| TokenError::Encoder(format!("{}: {}", self.as_str(), e)))
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
        match s {
            "r50k_base" | "gpt2" => Ok(Encoding::R50kBase),
            "p50k_base" => Ok(Encoding::P50kBase),
            "cl100k_base" => Ok(Encoding::Cl100kBase),
            other => Err(TokenError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Tokenizer vocabulary and context window of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelProfile {
    pub name: &'static str,
    pub encoding: Encoding,
    pub context_window: usize,
}

const PROFILES: &[ModelProfile] = &[
    ModelProfile { name: "gpt2", encoding: Encoding::R50kBase, context_window: DEFAULT_CONTEXT_WINDOW },
    ModelProfile { name: "davinci", encoding: Encoding::R50kBase, context_window: DEFAULT_CONTEXT_WINDOW },
    ModelProfile { name: "curie", encoding: Encoding::R50kBase, context_window: DEFAULT_CONTEXT_WINDOW },
    ModelProfile { name: "babbage", encoding: Encoding::R50kBase, context_window: DEFAULT_CONTEXT_WINDOW },
    ModelProfile { name: "ada", encoding: Encoding::R50kBase, context_window: DEFAULT_CONTEXT_WINDOW },
    ModelProfile { name: "text-davinci-002", encoding: Encoding::P50kBase, context_window: 4097 },
    ModelProfile { name: "text-davinci-003", encoding: Encoding::P50kBase, context_window: 4097 },
    ModelProfile { name: "code-davinci-002", encoding: Encoding::P50kBase, context_window: 8001 },
    ModelProfile { name: "gpt-3.5-turbo", encoding: Encoding::Cl100kBase, context_window: 4096 },
    ModelProfile { name: "gpt-4", encoding: Encoding::Cl100kBase, context_window: 8192 },
];

impl ModelProfile {
    /// Profile used for unknown models
    pub fn gpt2() -> Self {
        PROFILES[0]
    }

    /// Look up a model by name, accepting an `organization/` prefix
    pub fn lookup(model: &str) -> Option<Self> {
        let name = model.rsplit('/').next().unwrap_or(model);
        PROFILES.iter().copied().find(|profile| profile.name == name)
    }

    /// Look up a model, falling back to the GPT-2 profile for unknown models
    pub fn resolve(model: &str) -> Self {
        match Self::lookup(model) {
            Some(profile) => profile,
            None => {
                tracing::warn!(
                    "Unknown model '{}', falling back to {} profile",
                    model,
                    Self::gpt2().name
                );
                Self::gpt2()
            }
        }
    }
}
