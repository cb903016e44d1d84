/*!
 * Endpoint failover tests against unreachable loopback instances.
 *
 * Port 1 on loopback is never listening, so connections are refused
 * immediately and no external network is touched.
 */

use lingoswitch::errors::ProviderError;
use lingoswitch::providers::libretranslate::LibreTranslate;
use lingoswitch::providers::TranslationProvider;

use crate::common::capture_status;

fn unreachable_instances() -> Vec<String> {
    vec![
        "http://127.0.0.1:1".to_string(),
        "http://127.0.0.1:2".to_string(),
        "http://127.0.0.1:3".to_string(),
    ]
}

#[tokio::test]
async fn exhausts_all_instances_and_reports_attempts() {
    let (sink, status) = capture_status();
    let provider = LibreTranslate::with_instances(unreachable_instances(), status);

    let error = provider.translate("Hello", "en", "zh").await.unwrap_err();
    match error {
        ProviderError::AllInstancesExhausted { attempts, .. } => {
            // Attempts are bounded by the working-list length
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let info = provider.instance_info();
    assert_eq!(info.failed.len(), 3);
    assert!(sink.contains("failed health check"));
}

#[tokio::test]
async fn second_call_resets_failure_tracking_once() {
    let (sink, status) = capture_status();
    let provider = LibreTranslate::with_instances(unreachable_instances(), status);

    let first = provider.translate("Hello", "en", "zh").await;
    assert!(first.is_err());

    // Every instance is now failed; the next call clears the set once
    // and walks the full list again before giving up.
    let second = provider.translate("Hello again", "en", "zh").await;
    assert!(matches!(
        second.unwrap_err(),
        ProviderError::AllInstancesExhausted { attempts: 3, .. }
    ));
    assert!(sink.contains("resetting failure tracking"));
}

#[tokio::test]
async fn custom_instance_takes_priority() {
    let (_, status) = capture_status();
    let provider = LibreTranslate::with_instances(unreachable_instances(), status);

    assert!(provider.add_instance("http://127.0.0.1:4"));
    let info = provider.instance_info();
    assert_eq!(info.total, 4);
    assert_eq!(info.current, "http://127.0.0.1:4");
    assert_eq!(info.custom, vec!["http://127.0.0.1:4"]);

    assert_eq!(provider.clear_custom_instances(), 1);
    assert_eq!(provider.instance_info().total, 3);
}
