use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::ProviderError;
use crate::language_map::LanguageMapper;
use crate::providers::{self, api_error, http_client, transport_error, TranslationProvider};
use crate::status::StatusHandle;

const API_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
const WEB_ENDPOINT: &str = "https://www2.deepl.com/jsonrpc";

const LANG_OVERRIDES: &[(&str, &str)] = &[
    ("zh", "ZH"),
    ("ja", "JA"),
    ("en", "EN"),
    ("de", "DE"),
    ("fr", "FR"),
    ("it", "IT"),
    ("es", "ES"),
    ("pt", "PT"),
    ("ru", "RU"),
    ("pl", "PL"),
    ("nl", "NL"),
    ("sv", "SV"),
    ("da", "DA"),
    ("fi", "FI"),
    ("el", "EL"),
    ("hu", "HU"),
    ("cs", "CS"),
    ("ro", "RO"),
    ("sk", "SK"),
    ("sl", "SL"),
    ("bg", "BG"),
];

/// DeepL client.
///
/// With an API key, requests go to the official free-tier API. Without
/// one, the client falls back to the web app's JSON-RPC endpoint; that
/// path is unofficial and degrades to returning the input unchanged on
/// failure rather than erroring.
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// Canonical-to-provider language code mapping
    mapper: LanguageMapper,
    /// DeepL API key
    api_key: Option<String>,
    /// Advisory status channel
    status: StatusHandle,
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    text: [&'a str; 1],
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    translations: Vec<ApiTranslation>,
}

#[derive(Debug, Deserialize)]
struct ApiTranslation {
    text: String,
}

impl DeepL {
    /// Create a client; the official path activates once a key is set
    pub fn new(status: StatusHandle) -> Self {
        Self {
            client: http_client(),
            mapper: LanguageMapper::new(LANG_OVERRIDES),
            api_key: None,
            status,
        }
    }

    /// Set the DeepL API key
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// Official API path
    async fn translate_api(
        &self,
        api_key: &str,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let body = ApiRequest {
            text: [text],
            source_lang: from,
            target_lang: to,
        };
        let response = self
            .client
            .post(API_ENDPOINT)
            .timeout(providers::REQUEST_TIMEOUT)
            .header("Authorization", format!("DeepL-Auth-Key {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(API_ENDPOINT, e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        payload
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("empty translations list".to_string())
            })
    }

    /// Web JSON-RPC fallback. Returns the original text when anything
    /// goes wrong; the failure is only visible on the status channel.
    async fn translate_web(&self, text: &str, from: &str, to: &str) -> String {
        match self.request_web(text, from, to).await {
            Ok(translated) => translated,
            Err(e) => {
                self.status
                    .emit(&format!("deepl: web fallback failed ({}), keeping original text", e));
                text.to_string()
            }
        }
    }

    async fn request_web(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let request_id: u32 = rand::rng().random_range(1..=99_999_999);
        let body = json!({
            "jsonrpc": "2.0",
            "method": "LMT_handle_jobs",
            "params": {
                "jobs": [{
                    "kind": "default",
                    "raw_en_sentence": text,
                    "raw_en_context_before": [],
                    "raw_en_context_after": [],
                    "preferred_num_beams": 1
                }],
                "lang": {
                    "source_lang_user_selected": from.to_uppercase(),
                    "target_lang": to.to_uppercase()
                },
                "priority": 1,
                "commonJobParams": {},
                "timestamp": Utc::now().timestamp_millis()
            },
            "id": request_id
        });

        let response = self
            .client
            .post(WEB_ENDPOINT)
            .timeout(providers::REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(WEB_ENDPOINT, e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        payload["result"]["translations"]
            .get(0)
            .and_then(|t| t["beams"].get(0))
            .and_then(|b| b["postprocessed_sentence"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ProviderError::MalformedResponse(
                    "response missing postprocessed_sentence".to_string(),
                )
            })
    }
}

#[async_trait]
impl TranslationProvider for DeepL {
    fn name(&self) -> &str {
        "deepl"
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

        match self.api_key.as_deref() {
            Some(api_key) => self.translate_api(api_key, text, &from, &to).await,
            None => Ok(self.translate_web(text, &from, &to).await),
        }
    }
}
