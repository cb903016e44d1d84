use std::time::Duration;

use lingoswitch::chunking::{split_text, translate_chunked};
use lingoswitch::errors::ProviderError;

use crate::common::capture_status;

#[tokio::test]
async fn within_limit_invokes_once_without_status() {
    let (sink, status) = capture_status();
    let result = translate_chunked("short text", 100, Duration::ZERO, &status, "test", |chunk| {
        Box::pin(async move { Ok(chunk.to_uppercase()) })
    })
    .await
    .unwrap();
    assert_eq!(result, "SHORT TEXT");
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn oversized_text_is_chunked_and_rejoined_in_order() {
    let (sink, status) = capture_status();
    let text = "One sentence here. Another sentence follows! A third one? Plus one more.";
    let result = translate_chunked(text, 30, Duration::ZERO, &status, "test", |chunk| {
        Box::pin(async move { Ok(chunk.to_uppercase()) })
    })
    .await
    .unwrap();
    assert_eq!(
        result,
        "ONE SENTENCE HERE. ANOTHER SENTENCE FOLLOWS! A THIRD ONE? PLUS ONE MORE."
    );
    assert!(sink.contains("translating"));
}

#[tokio::test]
async fn failed_chunk_keeps_original_text() {
    let (sink, status) = capture_status();
    let text = "Good sentence one. This one is bad! Good sentence two.";
    let result = translate_chunked(text, 25, Duration::ZERO, &status, "test", |chunk| {
        Box::pin(async move {
            if chunk.contains("bad") {
                Err(ProviderError::RequestFailed("simulated failure".to_string()))
            } else {
                Ok(chunk.to_uppercase())
            }
        })
    })
    .await
    .unwrap();

    assert!(result.contains("GOOD SENTENCE ONE."));
    assert!(result.contains("This one is bad!"));
    assert!(result.contains("GOOD SENTENCE TWO."));
    assert!(sink.contains("keeping original text"));
}

#[test]
fn four_and_a_half_thousand_chars_make_three_chunks() {
    // 100 sentences of 45 characters, 4500 + separators overall
    let sentence = format!("{}.", "x".repeat(44));
    let text = vec![sentence.as_str(); 100].join(" ");
    let chunks = split_text(&text, 2000);
    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.chars().count() <= 2000));
}
