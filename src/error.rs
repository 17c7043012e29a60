//! Error types for Tokengauge
//!
//! This module defines the error type shared by the tokenizer, the token
//! counter and the tokenizer service.

use std::path::PathBuf;

use thiserror::Error;

/// Library-level errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// The tokenizer rejected its input
    #[error("Invalid tokenizer input: {0}")]
    InvalidInput(String),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// The vocabulary for an encoding could not be built
    #[error("Failed to load encoder: {0}")]
    Encoder(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Authentication rejected by tokenizer service")]
    Unauthorized,

    #[error("Invalid scratch directory {}: {reason}", .path.display())]
    ScratchDir { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl TokenError {
    /// Stable machine-readable code, used in CLI error output
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidInput(_) => "INVALID_INPUT",
            TokenError::UnknownEncoding(_) => "UNKNOWN_ENCODING",
            TokenError::Encoder(_) => "ENCODER_ERROR",
            TokenError::Unsupported(_) => "UNSUPPORTED",
            TokenError::Unauthorized => "UNAUTHORIZED",
            TokenError::ScratchDir { .. } => "SCRATCH_DIR",
            TokenError::Io(_) => "IO_ERROR",
            TokenError::Json(_) => "INVALID_JSON",
            TokenError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for convenience
pub type TokenResult<T> = Result<T, TokenError>;
