use async_trait::async_trait;
use md5::{Digest, Md5};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::language_map::LanguageMapper;
use crate::providers::{self, api_error, http_client, transport_error, TranslationProvider};
use crate::status::StatusHandle;

const API_ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";
const SUGGESTION_ENDPOINT: &str = "https://fanyi.baidu.com/sug";

const LANG_OVERRIDES: &[(&str, &str)] = &[
    ("zh", "zh"),
    ("ja", "jp"),
    ("en", "en"),
    ("ko", "kor"),
    ("ms", "may"),
    ("fr", "fra"),
    ("de", "de"),
    ("it", "it"),
    ("es", "spa"),
    ("pt", "pt"),
    ("ru", "ru"),
    ("ar", "ara"),
    ("hi", "hi"),
    ("th", "th"),
    ("vi", "vie"),
    ("tr", "tr"),
    ("pl", "pl"),
    ("nl", "nl"),
    ("sv", "swe"),
    ("da", "dan"),
    ("fi", "fin"),
    ("el", "el"),
    ("hu", "hu"),
    ("cs", "cs"),
    ("ro", "rom"),
    ("sk", "slo"),
    ("sl", "slo"),
    ("bg", "bul"),
    ("hr", "hrv"),
    ("sr", "srp"),
    ("uk", "ukr"),
];

/// Baidu Translate client.
///
/// The official API signs each request with
/// `md5(app_id + text + salt + secret_key)`. Without credentials the
/// client falls back to the public suggestion endpoint and returns the
/// first suggestion; that path is imprecise and degrades to returning
/// the input unchanged on failure.
#[derive(Debug)]
pub struct Baidu {
    /// HTTP client for API requests
    client: Client,
    /// Canonical-to-provider language code mapping
    mapper: LanguageMapper,
    /// Application identifier for the official API
    app_id: Option<String>,
    /// Shared secret for request signing
    secret_key: Option<String>,
    /// Advisory status channel
    status: StatusHandle,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    trans_result: Option<Vec<TransResult>>,
    error_code: Option<serde_json::Value>,
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransResult {
    dst: String,
}

#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    data: Option<Vec<Suggestion>>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    v: String,
}

/// Hex MD5 digest of the Baidu signing string
fn sign(app_id: &str, text: &str, salt: &str, secret_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(app_id.as_bytes());
    hasher.update(text.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(secret_key.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl Baidu {
    /// Create a client; the official path activates once credentials are set
    pub fn new(status: StatusHandle) -> Self {
        Self {
            client: http_client(),
            mapper: LanguageMapper::new(LANG_OVERRIDES),
            app_id: None,
            secret_key: None,
            status,
        }
    }

    /// Set the app id and secret key for the official API
    pub fn set_credentials(
        &mut self,
        app_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) {
        self.app_id = Some(app_id.into());
        self.secret_key = Some(secret_key.into());
    }

    async fn translate_api(
        &self,
        app_id: &str,
        secret_key: &str,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let salt = rand::rng().random_range(32768..=65536u32).to_string();
        let signature = sign(app_id, text, &salt, secret_key);

        let response = self
            .client
            .get(API_ENDPOINT)
            .timeout(providers::REQUEST_TIMEOUT)
            .query(&[
                ("q", text),
                ("from", from),
                ("to", to),
                ("appid", app_id),
                ("salt", &salt),
                ("sign", &signature),
            ])
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

        if let Some(results) = payload.trans_result {
            return results.into_iter().next().map(|r| r.dst).ok_or_else(|| {
                ProviderError::MalformedResponse("empty trans_result list".to_string())
            });
        }
        if let Some(code) = payload.error_code {
            let message = payload
                .error_msg
                .unwrap_or_else(|| format!("error code {}", code));
            return Err(ProviderError::ApiError {
                status_code: 0,
                message,
            });
        }
        Err(ProviderError::MalformedResponse(
            "response missing trans_result".to_string(),
        ))
    }

    /// Suggestion-endpoint fallback. Returns the original text when the
    /// endpoint yields nothing usable.
    async fn translate_suggestion(&self, text: &str) -> String {
        let result = async {
            let response = self
                .client
                .post(SUGGESTION_ENDPOINT)
                .timeout(providers::REQUEST_TIMEOUT)
                .form(&[("kw", text)])
                .send()
                .await
                .map_err(|e| transport_error(SUGGESTION_ENDPOINT, e))?;

            if !response.status().is_success() {
                return Err(api_error(response).await);
            }

            let payload: SuggestionResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

            payload
                .data
                .and_then(|suggestions| suggestions.into_iter().next())
                .map(|s| s.v)
                .ok_or_else(|| {
                    ProviderError::MalformedResponse("no suggestions returned".to_string())
                })
        }
        .await;

        match result {
            Ok(suggestion) => suggestion,
            Err(e) => {
                self.status.emit(&format!(
                    "baidu: suggestion fallback failed ({}), keeping original text",
                    e
                ));
                text.to_string()
            }
        }
    }
}

#[async_trait]
impl TranslationProvider for Baidu {
    fn name(&self) -> &str {
        "baidu"
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

        match (self.app_id.as_deref(), self.secret_key.as_deref()) {
            (Some(app_id), Some(secret_key)) => {
                self.translate_api(app_id, secret_key, text, &from, &to).await
            }
            _ => Ok(self.translate_suggestion(text).await),
        }
    }
}
