//! Authentication for the tokenizer service

use serde::{Deserialize, Serialize};

/// Credentials presented to the tokenizer service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Authentication {
    pub api_key: String,
}

impl Authentication {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}
