use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::language_map::LanguageMapper;
use crate::providers::{self, api_error, http_client, transport_error, TranslationProvider};
use crate::status::StatusHandle;

const API_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com/translate";

const LANG_OVERRIDES: &[(&str, &str)] = &[
    ("zh", "zh-Hans"),
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

/// Microsoft Translator client (Azure Cognitive Services).
///
/// Official API only. Without a subscription key the adapter is a no-op
/// that returns the input unchanged; there is no unauthenticated
/// endpoint to fall back to.
#[derive(Debug)]
pub struct Microsoft {
    /// HTTP client for API requests
    client: Client,
    /// Canonical-to-provider language code mapping
    mapper: LanguageMapper,
    /// Azure subscription key
    api_key: Option<String>,
    /// Azure resource region
    region: String,
    /// Advisory status channel
    status: StatusHandle,
}

#[derive(Debug, Serialize)]
struct RequestItem<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponseItem {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

impl Microsoft {
    /// Create a client; calls are no-ops until credentials are set
    pub fn new(status: StatusHandle) -> Self {
        Self {
            client: http_client(),
            mapper: LanguageMapper::new(LANG_OVERRIDES),
            api_key: None,
            region: "global".to_string(),
            status,
        }
    }

    /// Set the subscription key and resource region
    pub fn set_credentials(&mut self, api_key: impl Into<String>, region: impl Into<String>) {
        self.api_key = Some(api_key.into());
        self.region = region.into();
    }

    async fn translate_api(
        &self,
        api_key: &str,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let body = [RequestItem { text }];
        let response = self
            .client
            .post(API_ENDPOINT)
            .timeout(providers::REQUEST_TIMEOUT)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .query(&[("api-version", "3.0"), ("from", from), ("to", to)])
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(API_ENDPOINT, e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: Vec<ResponseItem> = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        payload
            .into_iter()
            .next()
            .and_then(|item| item.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("empty translations list".to_string())
            })
    }
}

#[async_trait]
impl TranslationProvider for Microsoft {
    fn name(&self) -> &str {
        "microsoft"
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
        let Some(api_key) = self.api_key.clone() else {
            // Known gap: no unauthenticated Microsoft endpoint exists
            self.status
                .emit("microsoft: no subscription key configured, returning input unchanged");
            return Ok(text.to_string());
        };

        let from = self.mapper.map(from);
        let to = self.mapper.map(to);
        self.translate_api(&api_key, text, &from, &to).await
    }
}
