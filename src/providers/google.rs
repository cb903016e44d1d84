use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::extract::extract_translation;
use crate::language_map::LanguageMapper;
use crate::providers::{self, api_error, http_client, transport_error, TranslationProvider};
use crate::status::StatusHandle;

const OFFICIAL_ENDPOINT: &str = "https://translation.googleapis.com";
const WEB_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

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
    ("sv", "sv"),
    ("da", "da"),
    ("fi", "fi"),
    ("no", "no"),
    ("el", "el"),
    ("he", "he"),
    ("id", "id"),
    ("bg", "bg"),
    ("ro", "ro"),
    ("hu", "hu"),
    ("cs", "cs"),
    ("sk", "sk"),
    ("sl", "sl"),
    ("hr", "hr"),
    ("sr", "sr"),
    ("uk", "uk"),
    ("ca", "ca"),
];

/// Google Translate client.
///
/// Two independent request paths: the official Cloud Translation API
/// (requires an API key) and the unauthenticated web-widget endpoint
/// whose response shape needs best-effort decoding. The preferred path is
/// chosen at configuration time; when it fails and the alternate path is
/// configured, the alternate is tried exactly once.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Canonical-to-provider language code mapping
    mapper: LanguageMapper,
    /// Google Cloud API key for the official path
    api_key: Option<String>,
    /// Official API base URL
    base_url: String,
    /// Web-widget endpoint URL
    web_endpoint: String,
    /// Whether the web path is tried first
    prefer_web: bool,
    /// Advisory status channel
    status: StatusHandle,
}

#[derive(Debug, Deserialize)]
struct OfficialResponse {
    data: OfficialData,
}

#[derive(Debug, Deserialize)]
struct OfficialData {
    translations: Vec<OfficialTranslation>,
}

#[derive(Debug, Deserialize)]
struct OfficialTranslation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslate {
    /// Create a client; without an API key the web path is preferred
    pub fn new(status: StatusHandle) -> Self {
        Self {
            client: http_client(),
            mapper: LanguageMapper::new(LANG_OVERRIDES),
            api_key: None,
            base_url: OFFICIAL_ENDPOINT.to_string(),
            web_endpoint: WEB_ENDPOINT.to_string(),
            prefer_web: true,
            status,
        }
    }

    /// Set the Google Cloud API key and prefer the official path
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
        self.prefer_web = false;
    }

    /// Override the official API base URL
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
    }

    /// Override the web-widget endpoint URL
    pub fn set_web_endpoint(&mut self, endpoint: impl Into<String>) {
        self.web_endpoint = endpoint.into();
    }

    /// Choose which path is tried first
    pub fn set_prefer_web(&mut self, prefer_web: bool) {
        self.prefer_web = prefer_web;
    }

    /// Official Cloud Translation API path
    async fn translate_official(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::AuthenticationError(
                "Google official API requires an API key".to_string(),
            ));
        };

        let url = format!("{}/language/translate/v2", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(providers::REQUEST_TIMEOUT)
            .query(&[
                ("key", api_key),
                ("q", text),
                ("source", from),
                ("target", to),
                ("format", "text"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: OfficialResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        payload
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("empty translations list".to_string())
            })
    }

    /// Unauthenticated web-widget path with best-effort decoding
    async fn translate_web(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(&self.web_endpoint)
            .timeout(providers::REQUEST_TIMEOUT)
            .header("Referer", "https://translate.google.com/")
            .query(&[
                ("client", "gtx"),
                ("sl", from),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| transport_error(&self.web_endpoint, e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        extract_translation(&payload).ok_or_else(|| {
            self.status
                .emit("google: could not decode web endpoint response");
            ProviderError::MalformedResponse(
                "unrecognized web endpoint response shape".to_string(),
            )
        })
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
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

        let (first, second) = if self.prefer_web {
            ("web", "official")
        } else {
            ("official", "web")
        };

        let primary = match first {
            "web" => self.translate_web(text, &from, &to).await,
            _ => self.translate_official(text, &from, &to).await,
        };
        let error = match primary {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        // The web path needs no credentials, so it is always available as
        // an alternate; the official path only when a key is configured.
        let alternate_configured = match second {
            "web" => true,
            _ => self.api_key.is_some(),
        };
        if !alternate_configured {
            return Err(error);
        }

        self.status.emit(&format!(
            "google: {} path failed ({}), retrying via {} path",
            first, error, second
        ));
        match second {
            "web" => self.translate_web(text, &from, &to).await,
            _ => self.translate_official(text, &from, &to).await,
        }
        .map_err(|fallback_error| {
            ProviderError::RequestFailed(format!(
                "both Google paths failed: {} path - {}; {} path - {}",
                first, error, second, fallback_error
            ))
        })
    }
}
