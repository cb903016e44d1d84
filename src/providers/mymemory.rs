use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::chunking::translate_chunked;
use crate::errors::ProviderError;
use crate::language_map::LanguageMapper;
use crate::providers::{self, http_client, transport_error, TranslationProvider};
use crate::status::StatusHandle;

const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// MyMemory rejects requests above 500 characters
const MAX_CHARS: usize = 500;

/// Delay between chunk requests
const CHUNK_PACING: Duration = Duration::from_millis(100);

const LANG_OVERRIDES: &[(&str, &str)] = &[
    ("zh", "zh-CN"),
    ("zh-TW", "zh-TW"),
    ("ja", "ja"),
    ("ko", "ko"),
    ("ms", "ms"),
    ("en", "en"),
    ("fr", "fr"),
    ("de", "de"),
    ("it", "it"),
    ("es", "es"),
    ("pt", "pt"),
    ("ru", "ru"),
    ("ar", "ar"),
    ("hi", "hi"),
    ("th", "th"),
    ("vi", "vi"),
    ("tr", "tr"),
    ("pl", "pl"),
    ("nl", "nl"),
];

/// MyMemory client (free tier, 1000 requests per day)
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// Canonical-to-provider language code mapping
    mapper: LanguageMapper,
    /// API endpoint, overridable for self-hosted gateways
    endpoint: String,
    /// Advisory status channel
    status: StatusHandle,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseStatus")]
    response_status: Option<Value>,
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
    #[serde(rename = "responseDetails")]
    response_details: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// The status field arrives as a number or a numeric string
fn status_code(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl MyMemory {
    /// Create a client against the public endpoint
    pub fn new(status: StatusHandle) -> Self {
        Self {
            client: http_client(),
            mapper: LanguageMapper::new(LANG_OVERRIDES),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            status,
        }
    }

    /// Point the client at a custom endpoint
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        self.endpoint = endpoint.trim_end_matches('/').to_string();
    }

    async fn request_chunk(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let langpair = format!("{}|{}", from, to);
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(providers::REQUEST_TIMEOUT)
            .query(&[("q", text), ("langpair", &langpair)])
            .send()
            .await
            .map_err(|e| transport_error(&self.endpoint, e))?;

        if !response.status().is_success() {
            return Err(providers::api_error(response).await);
        }

        let payload: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        match status_code(payload.response_status.as_ref()) {
            Some(200) => payload
                .response_data
                .and_then(|d| d.translated_text)
                .ok_or_else(|| {
                    ProviderError::MalformedResponse(
                        "response missing responseData.translatedText".to_string(),
                    )
                }),
            Some(403) => Err(ProviderError::QuotaExceeded(
                "MyMemory daily quota exhausted (1000 requests)".to_string(),
            )),
            other => {
                let details = payload
                    .response_details
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "unknown error".to_string());
                Err(ProviderError::ApiError {
                    status_code: other.and_then(|c| u16::try_from(c).ok()).unwrap_or(0),
                    message: details,
                })
            }
        }
    }
}

#[async_trait]
impl TranslationProvider for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    fn supported_languages(&self) -> Vec<String> {
        self.mapper.supported_codes().to_vec()
    }

    fn is_language_supported(&self, code: &str) -> bool {
        self.mapper.is_supported(code)
    }

    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let from = self.mapper.map(from);
        let to = self.mapper.map(to);
        translate_chunked(
            text,
            MAX_CHARS,
            CHUNK_PACING,
            &self.status,
            "mymemory",
            |chunk| {
                let from = from.clone();
                let to = to.clone();
                Box::pin(async move { self.request_chunk(&chunk, &from, &to).await })
            },
        )
        .await
    }
}
