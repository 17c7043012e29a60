//! Server-side tokenizer service
//!
//! Resolves tokenizer names to cached `BpeTokenizer`s and serves tokenize and
//! decode requests for authenticated callers.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TokenError, TokenResult};
use crate::service::auth::Authentication;
use crate::tokens::{BpeTokenizer, Encoding, ModelProfile, TokenId, Tokenizer};

/// Request to tokenize a text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenizationRequest {
    pub text: String,
    /// Encoding name (`r50k_base`) or model name (`openai/davinci`)
    pub tokenizer: String,
    /// Cut the token ids to `max_length`
    #[serde(default)]
    pub truncation: bool,
    #[serde(default)]
    pub max_length: usize,
}

impl TokenizationRequest {
    pub fn new(text: impl Into<String>, tokenizer: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokenizer: tokenizer.into(),
            truncation: false,
            max_length: 0,
        }
    }

    pub fn truncated_to(mut self, max_length: usize) -> Self {
        self.truncation = true;
        self.max_length = max_length;
        self
    }
}

/// Result of a tokenization request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenizationResult {
    pub text: String,
    pub tokens: Vec<TokenId>,
    /// Whether token ids were dropped because of `max_length`
    pub truncated: bool,
}

/// Request to turn token ids back into text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecodeRequest {
    pub tokens: Vec<TokenId>,
    pub tokenizer: String,
}

/// Result of a decode request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecodeResult {
    pub text: String,
}

/// Tokenizer service backing `TokenizerService` handles
///
/// # Thread Safety
///
/// The API key set and the tokenizer cache sit behind `RwLock`s, so one
/// service can be shared across threads.
pub struct ServerService {
    base_path: PathBuf,
    root_mode: bool,
    api_keys: RwLock<HashSet<String>>,
    tokenizers: RwLock<HashMap<Encoding, Arc<BpeTokenizer>>>,
}

impl ServerService {
    /// Create a service rooted at an existing scratch directory
    ///
    /// In root mode every API key is accepted.
    pub fn new(base_path: impl Into<PathBuf>, root_mode: bool) -> TokenResult<Self> {
        let base_path = base_path.into();
        match std::fs::metadata(&base_path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(TokenError::ScratchDir {
                    path: base_path,
                    reason: "not a directory".to_string(),
                })
            }
            Err(e) => {
                return Err(TokenError::ScratchDir {
                    path: base_path,
                    reason: e.to_string(),
                })
            }
        }

        info!(
            base_path = %base_path.display(),
            root_mode,
            "Tokenizer service initialized"
        );

        Ok(Self {
            base_path,
            root_mode,
            api_keys: RwLock::new(HashSet::new()),
            tokenizers: RwLock::new(HashMap::new()),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn root_mode(&self) -> bool {
        self.root_mode
    }

    /// Accept `api_key` outside root mode
    pub fn register_api_key(&self, api_key: impl Into<String>) -> TokenResult<()> {
        let mut keys = self
            .api_keys
            .write()
            .map_err(|e| anyhow::anyhow!("Failed to acquire API key lock: {}", e))?;
        keys.insert(api_key.into());
        Ok(())
    }

    /// Check credentials
    pub fn authenticate(&self, auth: &Authentication) -> TokenResult<()> {
        if self.root_mode {
            return Ok(());
        }

        let keys = self
            .api_keys
            .read()
            .map_err(|e| anyhow::anyhow!("Failed to acquire API key lock: {}", e))?;
        if keys.contains(&auth.api_key) {
            Ok(())
        } else {
            Err(TokenError::Unauthorized)
        }
    }

    /// Get or create the tokenizer for an encoding or model name
    pub fn get_tokenizer(&self, name: &str) -> TokenResult<Arc<BpeTokenizer>> {
        let encoding = resolve_encoding(name)?;

        {
            let cache = self
                .tokenizers
                .read()
                .map_err(|e| anyhow::anyhow!("Failed to acquire tokenizer cache lock: {}", e))?;
            if let Some(tokenizer) = cache.get(&encoding) {
                return Ok(tokenizer.clone());
            }
        }

        let mut cache = self
            .tokenizers
            .write()
            .map_err(|e| anyhow::anyhow!("Failed to acquire tokenizer cache lock: {}", e))?;
        if let Some(tokenizer) = cache.get(&encoding) {
            return Ok(tokenizer.clone());
        }

        debug!(encoding = %encoding, "Loading tokenizer");
        let tokenizer = Arc::new(BpeTokenizer::new(encoding)?);
        cache.insert(encoding, tokenizer.clone());
        Ok(tokenizer)
    }

    /// Tokenize a text
    pub fn tokenize(
        &self,
        auth: &Authentication,
        request: &TokenizationRequest,
    ) -> TokenResult<TokenizationResult> {
        self.authenticate(auth)?;
        let tokenizer = self.get_tokenizer(&request.tokenizer)?;

        let mut tokens = tokenizer.tokenize(&request.text)?;
        let truncated = request.truncation && tokens.len() > request.max_length;
        if truncated {
            tokens.truncate(request.max_length);
        }

        Ok(TokenizationResult {
            text: request.text.clone(),
            tokens,
            truncated,
        })
    }

    /// Decode token ids
    pub fn decode(&self, auth: &Authentication, request: &DecodeRequest) -> TokenResult<DecodeResult> {
        self.authenticate(auth)?;
        let tokenizer = self.get_tokenizer(&request.tokenizer)?;
        Ok(DecodeResult {
            text: tokenizer.decode(&request.tokens)?,
        })
    }
}

/// Encoding names are accepted as-is; anything else must be a known model
fn resolve_encoding(name: &str) -> TokenResult<Encoding> {
    if let Ok(encoding) = name.parse::<Encoding>() {
        return Ok(encoding);
    }
    ModelProfile::lookup(name)
        .map(|profile| profile.encoding)
        .ok_or_else(|| TokenError::UnknownEncoding(name.to_string()))
}
