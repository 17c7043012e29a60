//! Common test utilities for Tokengauge
//!
//! This module provides the shared adapter fixture and the test prompt and
//! completion used across the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use tokengauge::{Authentication, Sequence, ServerService, Token, TokenizerService};

/// Test configuration constants
pub mod constants {
    /// API key used by the fixture's tokenizer service handle
    pub const TEST_API_KEY: &str = "test";

    /// 51 tokens according to the GPT-2 tokenizer
    pub const TEST_PROMPT: &str = "The Center for Research on Foundation Models (CRFM) is \
        an interdisciplinary initiative born out of the Stanford \
        Institute for Human-Centered Artificial Intelligence (HAI) \
        that aims to make fundamental advances in the study, development, \
        and deployment of foundation models.";

    pub const TEST_PROMPT_TOKENS: usize = 51;

    /// 32 tokens according to the GPT-2 tokenizer
    pub const TEST_COMPLETION: &str = " The CRFM is dedicated to advancing our knowledge of the \
        foundations of artificial intelligence (AI) and related fields. It focuses on \
        foundational questions in AI, which are";

    pub const TEST_COMPLETION_TOKENS: usize = 32;

    /// Context window of the GPT-2 vocabulary models
    pub const CONTEXT_WINDOW: usize = 2049;
}

/// Scratch directory and tokenizer service for one test case
///
/// The directory is created by `new` and removed when the fixture is dropped,
/// whether the test passes, fails or panics.
pub struct AdapterFixture {
    scratch: TempDir,
    pub tokenizer_service: TokenizerService,
}

impl AdapterFixture {
    pub fn new() -> Self {
        let scratch = TempDir::new().expect("Failed to create temp directory");
        let service = ServerService::new(scratch.path(), true)
            .expect("Failed to create tokenizer service");
        let tokenizer_service = TokenizerService::new(
            Arc::new(service),
            Authentication::new(constants::TEST_API_KEY),
        );

        Self {
            scratch,
            tokenizer_service,
        }
    }

    pub fn path(&self) -> &Path {
        self.scratch.path()
    }
}

/// The completion of the test prompt, with the per-token log-probabilities
/// reported by the model
pub fn test_completion() -> Sequence {
    let tokens = [
        (" The", -1.8096403, "\n", -1.6654028),
        (" CR", -1.2861944, " CR", -1.2861944),
        ("FM", -0.0032369632, "FM", -0.0032369632),
        (" is", -1.4355252, " is", -1.4355252),
        (" dedicated", -3.814422, " a", -1.8003343),
        (" to", -0.009623392, " to", -0.009623392),
        (" advancing", -2.6732886, " the", -1.859751),
        (" our", -3.123714, " the", -1.0504603),
        (" knowledge", -3.030337, " understanding", -0.34646907),
        (" of", -0.46280858, " of", -0.46280858),
        (" the", -1.4058315, " the", -1.4058315),
        (" foundations", -2.0638132, " foundations", -2.0638132),
        (" of", -0.2607486, " of", -0.2607486),
        (" artificial", -1.1653417, " artificial", -1.1653417),
        (" intelligence", -0.03756146, " intelligence", -0.03756146),
        (" (", -2.019812, ",", -1.3503861),
        ("AI", -0.03869382, "AI", -0.03869382),
        (")", -0.49895737, ")", -0.49895737),
        (" and", -0.81909865, " and", -0.81909865),
        (" related", -2.611718, " to", -2.3555496),
        (" fields", -0.7640527, " fields", -0.7640527),
        (".", -1.8066244, ",", -1.2972366),
        (" It", -2.2856107, "\n", -1.7865871),
        (" focuses", -3.3735154, " is", -1.4982711),
        (" on", -0.13244776, " on", -0.13244776),
        (" foundational", -1.2640914, " foundational", -1.2640914),
        (" questions", -2.010647, " issues", -1.673752),
        (" in", -1.980726, " that", -1.8133409),
        (" AI", -0.5709368, " AI", -0.5709368),
        (",", -1.036094, ",", -1.036094),
        (" which", -3.826836, " such", -2.0843854),
        (" are", -1.3858839, " are", -1.3858839),
    ]
    .into_iter()
    .map(|(text, logprob, top_text, top_logprob)| {
        Token::new(text, logprob).with_top_logprob(top_text, top_logprob)
    })
    .collect();

    Sequence::new(constants::TEST_COMPLETION, -49.00783279519999, tokens)
}
