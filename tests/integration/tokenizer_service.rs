//! Adapter fixture and tokenizer service tests
//!
//! Every test gets a fresh scratch directory and a root-mode tokenizer
//! service; the directory is gone once the fixture is dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tokengauge::service::{DecodeRequest, TokenizationRequest};
use tokengauge::{
    Authentication, Request, ServerService, ServiceTokenizer, TokenCounter, TokenError,
    TokenizerService,
};

use crate::common::{constants, test_completion, AdapterFixture};

#[test]
fn test_fixture_scratch_dir_lifecycle() {
    let path = {
        let fixture = AdapterFixture::new();
        assert!(fixture.path().is_dir());
        assert_eq!(fixture.tokenizer_service.server().base_path(), fixture.path());
        fixture.path().to_path_buf()
    };
    assert!(!path.exists());
}

#[test]
fn test_fixture_scratch_dir_removed_on_panic() {
    let mut seen = None;
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let fixture = AdapterFixture::new();
        seen = Some(fixture.path().to_path_buf());
        panic!("test case failed");
    }));

    assert!(result.is_err());
    let path = seen.expect("fixture should have been created");
    assert!(!path.exists());
}

#[test]
fn test_service_tokenize() {
    let fixture = AdapterFixture::new();
    let request = TokenizationRequest::new(constants::TEST_PROMPT, "openai/davinci");

    let result = fixture.tokenizer_service.tokenize(&request).unwrap();
    assert_eq!(result.tokens.len(), constants::TEST_PROMPT_TOKENS);
    assert!(!result.truncated);
    assert_eq!(result.text, constants::TEST_PROMPT);
}

#[test]
fn test_service_tokenize_truncates_to_max_length() {
    let fixture = AdapterFixture::new();
    let request =
        TokenizationRequest::new(constants::TEST_PROMPT, "r50k_base").truncated_to(10);

    let result = fixture.tokenizer_service.tokenize(&request).unwrap();
    assert_eq!(result.tokens.len(), 10);
    assert!(result.truncated);

    let decoded = fixture
        .tokenizer_service
        .decode(&DecodeRequest {
            tokens: result.tokens,
            tokenizer: "r50k_base".to_string(),
        })
        .unwrap();
    assert!(constants::TEST_PROMPT.starts_with(&decoded.text));
}

#[test]
fn test_service_unknown_tokenizer() {
    let fixture = AdapterFixture::new();
    let request = TokenizationRequest::new("Hello", "no-such-model");
    assert!(matches!(
        fixture.tokenizer_service.tokenize(&request),
        Err(TokenError::UnknownEncoding(_))
    ));
}

#[test]
fn test_counter_backed_by_service() {
    let fixture = AdapterFixture::new();
    let tokenizer = ServiceTokenizer::new(fixture.tokenizer_service.clone(), "openai/davinci");
    let counter = TokenCounter::with_tokenizer(Arc::new(tokenizer), constants::CONTEXT_WINDOW);

    let request = Request::new(constants::TEST_PROMPT)
        .with_num_completions(3)
        .with_max_tokens(100);

    assert_eq!(counter.count_tokens(&request, &[test_completion()]).unwrap(), 51 + 32);
    assert_eq!(counter.estimate_tokens(&request).unwrap(), 51 + 3 * 100);
    assert!(counter
        .fits_within_context_window(constants::TEST_PROMPT, constants::CONTEXT_WINDOW - 51)
        .unwrap());
}

#[test]
fn test_non_root_service_requires_registered_key() {
    let fixture = AdapterFixture::new();
    let server = Arc::new(ServerService::new(fixture.path(), false).unwrap());

    let stranger = TokenizerService::new(server.clone(), Authentication::new("stranger"));
    let request = TokenizationRequest::new("Hello", "gpt2");
    assert!(matches!(
        stranger.tokenize(&request),
        Err(TokenError::Unauthorized)
    ));

    server.register_api_key(constants::TEST_API_KEY).unwrap();
    let member = TokenizerService::new(server, Authentication::new(constants::TEST_API_KEY));
    assert_eq!(member.tokenize(&request).unwrap().tokens.len(), 1);
}
