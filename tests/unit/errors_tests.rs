/*!
 * Tests for error rendering and classification
 */

use summarize_pro::errors::{AppError, ProviderError, SummarizationError, TranslationError};

#[test]
fn test_adapter_errors_withProviderCause_shouldKeepLegacyPrefix() {
    let translation = TranslationError::from(ProviderError::ConnectionError("timed out".to_string()));
    assert_eq!(translation.to_string(), "Translation error: Connection error: timed out");

    let summarization = SummarizationError::from(ProviderError::ApiError {
        status_code: 500,
        message: "boom".to_string(),
    });
    assert_eq!(
        summarization.to_string(),
        "Summarization error: API responded with error: 500 - boom"
    );

    // Wrapping keeps the adapter text unchanged
    assert_eq!(AppError::from(translation).to_string(), "Translation error: Connection error: timed out");
    assert!(AppError::from(SummarizationError::EmptyResponse)
        .to_string()
        .starts_with("Summarization error: "));
}

#[test]
fn test_provider_error_fromStatus_shouldClassifyAndRetry() {
    assert!(matches!(ProviderError::from_status(401, "no"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "slow"), ProviderError::RateLimitExceeded(_)));
    assert!(matches!(
        ProviderError::from_status(503, "down"),
        ProviderError::ApiError { status_code: 503, .. }
    ));

    assert!(ProviderError::from_status(503, "down").is_retryable());
    assert!(ProviderError::from_status(429, "slow").is_retryable());
    assert!(!ProviderError::from_status(400, "bad").is_retryable());
    assert!(!ProviderError::ParseError("json".to_string()).is_retryable());
}

#[test]
fn test_app_error_fromIo_shouldBecomeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(AppError::from(io), AppError::File(_)));
}
