/*!
 * Text chunking for provider request-size limits.
 *
 * Providers impose per-request character limits (LibreTranslate 2000,
 * MyMemory 500). Oversized input is split on sentence-terminal
 * punctuation and greedily packed into chunks; each chunk is translated
 * independently and the results are rejoined with single spaces. A chunk
 * whose translation fails keeps its original text, so one bad chunk never
 * aborts the whole document.
 */

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ProviderError;
use crate::status::StatusHandle;

/// Sentence runs ending in Latin or CJK terminal punctuation, with the
/// inter-sentence whitespace swallowed by the match
static SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[^.!?。！？]+[.!?。！？]*|[.!?。！？]+)\s*").expect("sentence pattern")
});

/// Split text into sentences, keeping terminal punctuation attached
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE.find_iter(text).map(|m| m.as_str().trim_end())
}

/// Split `text` into chunks of at most `max_len` characters.
///
/// Text within the limit is returned unchanged as a single chunk.
/// Sentences are packed greedily with a one-character budget for the
/// joining space. A single sentence longer than `max_len` is force-sliced
/// into exact `max_len`-character windows.
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in sentences(text) {
        let sentence_len = sentence.chars().count();
        if current_len + sentence_len + 1 <= max_len {
            if current.is_empty() {
                current.push_str(sentence);
                current_len = sentence_len;
            } else {
                current.push(' ');
                current.push_str(sentence);
                current_len += sentence_len + 1;
            }
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(sentence);
            current_len = sentence_len;

            if current_len > max_len {
                let chars: Vec<char> = current.chars().collect();
                for window in chars.chunks(max_len) {
                    chunks.push(window.iter().collect());
                }
                current.clear();
                current_len = 0;
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Reassemble independently translated chunks in original order
pub fn join_chunks(chunks: &[String]) -> String {
    chunks.join(" ")
}

/// Future produced by a per-chunk translation closure
pub type ChunkFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;

/// Drive a chunked translation.
///
/// Within the limit, `op` is invoked once and its result returned as-is.
/// Otherwise the text is split, each chunk translated in order with a
/// pacing delay between requests, and a failed chunk replaced by its
/// original text. Chunk progress and chunk failures go to the status
/// channel.
pub async fn translate_chunked<'a, F>(
    text: &str,
    max_chars: usize,
    pacing: Duration,
    status: &StatusHandle,
    label: &str,
    mut op: F,
) -> Result<String, ProviderError>
where
    F: FnMut(String) -> ChunkFuture<'a>,
{
    let total_len = text.chars().count();
    if total_len <= max_chars {
        return op(text.to_string()).await;
    }

    let chunks = split_text(text, max_chars);
    status.emit(&format!(
        "{}: text length {} exceeds limit {}, translating {} chunks",
        label,
        total_len,
        max_chars,
        chunks.len()
    ));

    let mut translated = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        status.emit(&format!(
            "{}: translating chunk {}/{} (length {})",
            label,
            index + 1,
            chunks.len(),
            chunk.chars().count()
        ));
        match op(chunk.clone()).await {
            Ok(text) => translated.push(text),
            Err(e) => {
                status.emit(&format!(
                    "{}: chunk {}/{} failed ({}), keeping original text",
                    label,
                    index + 1,
                    chunks.len(),
                    e
                ));
                translated.push(chunk.clone());
            }
        }
        if index + 1 < chunks.len() {
            tokio::time::sleep(pacing).await;
        }
    }

    Ok(join_chunks(&translated))
}
