/*!
 * Tests for error types and conversions
 */

use lingoswitch::errors::{ProviderError, ProviderFailure, TranslationError};

#[test]
fn provider_error_messages_are_descriptive() {
    let error = ProviderError::UnsupportedLanguagePair {
        from: "en".to_string(),
        to: "xx".to_string(),
    };
    assert_eq!(error.to_string(), "unsupported language pair: en -> xx");

    let error = ProviderError::AllInstancesExhausted {
        attempts: 7,
        last_error: "connection refused".to_string(),
    };
    assert!(error.to_string().contains("7 instances failed"));
    assert!(error.to_string().contains("connection refused"));

    let error = ProviderError::ApiError {
        status_code: 429,
        message: "slow down".to_string(),
    };
    assert!(error.to_string().contains("429"));
}

#[test]
fn aggregate_error_embeds_every_cause() {
    let error = TranslationError::AllProvidersExhausted(vec![
        ProviderFailure {
            provider: "libretranslate".to_string(),
            message: "all 7 instances failed".to_string(),
        },
        ProviderFailure {
            provider: "mymemory".to_string(),
            message: "quota exceeded: daily quota".to_string(),
        },
    ]);
    let message = error.to_string();
    assert!(message.contains("libretranslate: all 7 instances failed"));
    assert!(message.contains("mymemory: quota exceeded"));
}

#[test]
fn provider_errors_convert_into_translation_errors() {
    let error: TranslationError =
        ProviderError::QuotaExceeded("daily limit".to_string()).into();
    assert!(matches!(error, TranslationError::Provider(_)));
    assert!(error.to_string().contains("daily limit"));
}
