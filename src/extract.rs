/*!
 * Best-effort extraction of translated text from loosely shaped JSON.
 *
 * The unauthenticated Google web endpoint returns payloads whose shape
 * varies between deployments: sometimes a keyed object, usually the
 * widget's nested-array convention, occasionally something else entirely.
 * Extraction runs an ordered list of pure strategies over the decoded
 * value and returns the first match. All strategies failing is a parse
 * failure, never an empty-string success.
 */

use serde_json::Value;

/// Object keys commonly carrying the translated text
const KNOWN_KEYS: [&str; 4] = ["translatedText", "translation", "text", "data"];

/// Heuristic search only trusts strings longer than this
const MIN_HEURISTIC_LEN: usize = 10;

/// How deep the heuristic search may recurse
const MAX_SEARCH_DEPTH: usize = 3;

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strategy 1: look up well-known keys, descending one level into a
/// matched list or object.
fn from_known_keys(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    for key in KNOWN_KEYS {
        match object.get(key) {
            Some(Value::String(s)) => return non_empty(s),
            Some(Value::Array(items)) => match items.first() {
                Some(Value::String(s)) => return non_empty(s),
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(s)) = inner.get("translatedText") {
                        return non_empty(s);
                    }
                }
                _ => {}
            },
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("translatedText") {
                    return non_empty(s);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strategy 2: the web widget convention. The payload is a list whose
/// first element is a list of `[translated, original, ..]` groups;
/// first-position fragments concatenate into the full translation.
fn from_widget_groups(value: &Value) -> Option<String> {
    let groups = value.as_array()?.first()?.as_array()?;
    let mut parts = Vec::new();
    for group in groups {
        if let Some(Value::String(fragment)) = group.as_array().and_then(|g| g.first()) {
            if !fragment.is_empty() {
                parts.push(fragment.as_str());
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        non_empty(&parts.concat())
    }
}

/// Strategy 3: bounded-depth scan. Object keys containing "trans" are
/// preferred; the first sufficiently long string wins.
fn search(value: &Value, depth: usize) -> Option<String> {
    if depth == 0 {
        return None;
    }
    match value {
        Value::String(s) if s.chars().count() > MIN_HEURISTIC_LEN => non_empty(s),
        Value::Array(items) => items.iter().find_map(|item| search(item, depth - 1)),
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| key.to_lowercase().contains("trans"))
            .find_map(|(_, nested)| search(nested, depth - 1))
            .or_else(|| map.values().find_map(|nested| search(nested, depth - 1))),
        _ => None,
    }
}

fn from_deep_search(value: &Value) -> Option<String> {
    search(value, MAX_SEARCH_DEPTH)
}

/// Ordered extraction strategies, most deterministic first
const STRATEGIES: [fn(&Value) -> Option<String>; 3] =
    [from_known_keys, from_widget_groups, from_deep_search];

/// Extract the translated text from an untyped payload, if any strategy
/// recognizes its shape.
pub fn extract_translation(value: &Value) -> Option<String> {
    STRATEGIES.iter().find_map(|strategy| strategy(value))
}
