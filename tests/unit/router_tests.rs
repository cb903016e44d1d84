use std::sync::Arc;

use lingoswitch::errors::TranslationError;
use lingoswitch::providers::TranslationProvider;
use lingoswitch::router::TranslationRouter;

use crate::common::capture_status;
use crate::common::mock_providers::{MockBehavior, ScriptedProvider};

fn as_dyn(provider: &Arc<ScriptedProvider>) -> Arc<dyn TranslationProvider> {
    provider.clone()
}

#[tokio::test]
async fn empty_input_returns_empty_without_calls() {
    let (_, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &[], MockBehavior::Working);
    let router = TranslationRouter::with_providers(vec![as_dyn(&alpha)], status);

    assert_eq!(router.translate("", "en", "zh").await.unwrap(), "");
    assert_eq!(router.translate("   \t\n", "en", "zh").await.unwrap(), "");
    assert_eq!(alpha.call_count(), 0);
}

#[tokio::test]
async fn switches_to_supporting_provider() {
    let (sink, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &["en", "fr"], MockBehavior::Working);
    let beta = ScriptedProvider::new("beta", &["en", "zh"], MockBehavior::Working);
    let router =
        TranslationRouter::with_providers(vec![as_dyn(&alpha), as_dyn(&beta)], status);

    assert_eq!(router.current_provider(), "alpha");
    let result = router.translate("Hello", "en", "zh").await.unwrap();
    assert_eq!(result, "[zh] Hello");
    assert_eq!(router.current_provider(), "beta");
    assert_eq!(alpha.call_count(), 0);
    assert_eq!(beta.call_count(), 1);
    assert!(sink.contains("switching provider to beta"));
}

#[tokio::test]
async fn unsupported_pair_proceeds_with_current_provider() {
    let (sink, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &["en", "fr"], MockBehavior::Working);
    let router = TranslationRouter::with_providers(vec![as_dyn(&alpha)], status);

    // No provider declares support, so the current one is tried anyway
    let result = router.translate("Hello", "en", "xx").await.unwrap();
    assert_eq!(result, "[xx] Hello");
    assert_eq!(alpha.call_count(), 1);
    assert!(sink.contains("no provider explicitly supports"));
}

#[tokio::test]
async fn falls_back_on_failure_without_switching_current() {
    let (sink, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &[], MockBehavior::Failing);
    let beta = ScriptedProvider::new("beta", &[], MockBehavior::Working);
    let router =
        TranslationRouter::with_providers(vec![as_dyn(&alpha), as_dyn(&beta)], status);

    let result = router.translate("Hello", "en", "zh").await.unwrap();
    assert_eq!(result, "[zh] Hello");
    // Fallback success does not move the current-provider pointer
    assert_eq!(router.current_provider(), "alpha");
    assert_eq!(alpha.call_count(), 1);
    assert_eq!(beta.call_count(), 1);
    assert!(sink.contains("trying fallback provider beta"));
}

#[tokio::test]
async fn fallback_never_retries_failed_provider() {
    let (_, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &[], MockBehavior::Failing);
    let beta = ScriptedProvider::new("beta", &[], MockBehavior::Failing);
    let gamma = ScriptedProvider::new("gamma", &[], MockBehavior::Failing);
    let router = TranslationRouter::with_providers(
        vec![as_dyn(&alpha), as_dyn(&beta), as_dyn(&gamma)],
        status,
    );

    let error = router.translate("Hello", "en", "zh").await.unwrap_err();
    assert!(matches!(error, TranslationError::AllProvidersExhausted(_)));
    // Each provider tried exactly once: the primary plus two fallbacks
    assert_eq!(alpha.call_count(), 1);
    assert_eq!(beta.call_count(), 1);
    assert_eq!(gamma.call_count(), 1);
}

#[tokio::test]
async fn aggregate_error_reports_every_failure() {
    let (_, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &[], MockBehavior::Failing);
    let beta = ScriptedProvider::new("beta", &[], MockBehavior::QuotaLimited);
    let gamma = ScriptedProvider::new("gamma", &[], MockBehavior::Failing);
    let router = TranslationRouter::with_providers(
        vec![as_dyn(&alpha), as_dyn(&beta), as_dyn(&gamma)],
        status,
    );

    let error = router.translate("Hello", "en", "zh").await.unwrap_err();
    let message = error.to_string();
    assert!(message.contains("alpha scripted failure"), "{}", message);
    assert!(message.contains("beta daily quota exhausted"), "{}", message);
    assert!(message.contains("gamma scripted failure"), "{}", message);

    match error {
        TranslationError::AllProvidersExhausted(failures) => {
            assert_eq!(failures.len(), 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn set_provider_rejects_unknown_names() {
    let (_, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &[], MockBehavior::Working);
    let beta = ScriptedProvider::new("beta", &[], MockBehavior::Working);
    let router =
        TranslationRouter::with_providers(vec![as_dyn(&alpha), as_dyn(&beta)], status);

    assert!(router.set_provider("beta"));
    assert_eq!(router.current_provider(), "beta");
    assert!(!router.set_provider("missing"));
    assert_eq!(router.current_provider(), "beta");
}

#[tokio::test]
async fn supported_languages_intersects_declared_lists() {
    let (_, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &["en", "zh", "fr"], MockBehavior::Working);
    let beta = ScriptedProvider::new("beta", &["zh", "en"], MockBehavior::Working);
    // Declares no list: excluded from the intersection
    let gamma = ScriptedProvider::new("gamma", &[], MockBehavior::Working);
    let router = TranslationRouter::with_providers(
        vec![as_dyn(&alpha), as_dyn(&beta), as_dyn(&gamma)],
        status,
    );

    assert_eq!(router.supported_languages(None), vec!["en", "zh"]);
    assert_eq!(
        router.supported_languages(Some("beta")),
        vec!["zh", "en"]
    );
    assert!(router.supported_languages(Some("missing")).is_empty());
}

#[tokio::test]
async fn language_pair_support_queries() {
    let (_, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &["en", "fr"], MockBehavior::Working);
    let beta = ScriptedProvider::new("beta", &["en", "zh"], MockBehavior::Working);
    let router =
        TranslationRouter::with_providers(vec![as_dyn(&alpha), as_dyn(&beta)], status);

    assert!(router.is_language_supported("en", "zh", None));
    assert!(!router.is_language_supported("fr", "zh", None));
    assert!(router.is_language_supported("en", "fr", Some("alpha")));
    assert!(!router.is_language_supported("en", "zh", Some("alpha")));
    assert!(!router.is_language_supported("en", "zh", Some("missing")));
}

#[tokio::test]
async fn no_providers_is_an_error() {
    let (_, status) = capture_status();
    let router = TranslationRouter::with_providers(Vec::new(), status);
    let error = router.translate("Hello", "en", "zh").await.unwrap_err();
    assert!(matches!(error, TranslationError::NoProviders));
}

#[tokio::test]
async fn registry_lists_providers_in_registration_order() {
    let (_, status) = capture_status();
    let alpha = ScriptedProvider::new("alpha", &[], MockBehavior::Working);
    let beta = ScriptedProvider::new("beta", &[], MockBehavior::Working);
    let router =
        TranslationRouter::with_providers(vec![as_dyn(&alpha), as_dyn(&beta)], status);
    assert_eq!(router.available_providers(), vec!["alpha", "beta"]);
}
