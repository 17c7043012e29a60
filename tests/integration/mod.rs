//! Integration tests for Tokengauge
//!
//! These tests exercise the token counter against the real GPT-2 vocabulary,
//! the deterministic test tokenizers, and the in-process tokenizer service.

mod tokenizer_service;
