use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chunking::translate_chunked;
use crate::errors::ProviderError;
use crate::instances::{InstanceInfo, InstancePool};
use crate::language_map::LanguageMapper;
use crate::providers::{
    self, api_error, http_client, transport_error, TranslationProvider,
};
use crate::status::StatusHandle;

/// Public fallback instances, tried in order after any custom instances
pub const PUBLIC_INSTANCES: [&str; 7] = [
    "https://translate.fedilab.app",
    "https://translate.terraprint.co",
    "https://translate.api.skitzen.com",
    "https://libretranslate.pussthecat.org",
    "https://translate.argosopentech.com",
    "https://libretranslate.de",
    "https://libretranslate.com",
];

/// The hosted instance that accepts an API key
const OFFICIAL_HOST: &str = "libretranslate.com";

/// Per-request character limit imposed by most instances
const MAX_CHARS: usize = 2000;

/// Delay between chunk requests, to stay under instance rate limits
const CHUNK_PACING: Duration = Duration::from_millis(200);

/// Delay before retrying on another instance after a request failure
const FAILOVER_DELAY: Duration = Duration::from_secs(1);

const LANG_OVERRIDES: &[(&str, &str)] = &[
    ("zh", "zh-Hans"),
    ("zh-TW", "zh-Hant"),
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
    ("af", "af"),
    ("sw", "sw"),
    ("eo", "eo"),
    ("tl", "tl"),
];

/// LibreTranslate client with multi-instance failover
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Canonical-to-provider language code mapping
    mapper: LanguageMapper,
    /// Ordered endpoint pool with failure tracking
    pool: InstancePool,
    /// API key, used only against the official hosted instance
    api_key: Option<String>,
    /// Advisory status channel
    status: StatusHandle,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

impl LibreTranslate {
    /// Create a client over the default public instance list
    pub fn new(status: StatusHandle) -> Self {
        Self::with_instances(
            PUBLIC_INSTANCES.iter().map(|s| s.to_string()).collect(),
            status,
        )
    }

    /// Create a client over an explicit instance list
    pub fn with_instances(instances: Vec<String>, status: StatusHandle) -> Self {
        Self {
            client: http_client(),
            mapper: LanguageMapper::new(LANG_OVERRIDES),
            pool: InstancePool::new(instances),
            api_key: None,
            status,
        }
    }

    /// Set the API key used against the official hosted instance
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// Add a custom instance after any existing custom instances
    pub fn add_instance(&self, url: &str) -> bool {
        let added = self.pool.add_custom(url);
        if added {
            self.status
                .emit(&format!("libretranslate: added custom instance {}", url));
        }
        added
    }

    /// Add or move a custom instance to the front of the pool
    pub fn set_primary_instance(&self, url: &str) -> bool {
        let promoted = self.pool.promote_custom(url);
        if promoted {
            self.status
                .emit(&format!("libretranslate: primary instance set to {}", url));
        }
        promoted
    }

    /// Remove a previously added custom instance
    pub fn remove_instance(&self, url: &str) -> bool {
        self.pool.remove_custom(url)
    }

    /// Drop all custom instances, restoring the public list
    pub fn clear_custom_instances(&self) -> usize {
        self.pool.clear_custom()
    }

    /// Snapshot of the instance pool for display
    pub fn instance_info(&self) -> InstanceInfo {
        self.pool.info()
    }

    /// Lightweight health probe against one instance
    async fn probe(&self, base: &str) -> bool {
        let url = format!("{}/languages", base);
        match self
            .client
            .get(&url)
            .timeout(providers::PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// One translation request against one instance
    async fn request_chunk(
        &self,
        base: &str,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", base);
        let api_key = if base.contains(OFFICIAL_HOST) {
            self.api_key.as_deref()
        } else {
            None
        };
        let body = TranslateRequest {
            q: text,
            source: from,
            target: to,
            format: "text",
            api_key,
        };

        let response = self
            .client
            .post(&url)
            .timeout(providers::REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(base, e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        if let Some(translated) = payload.translated_text {
            return Ok(translated);
        }
        match payload.error {
            Some(message) if message.contains("API key") => {
                Err(ProviderError::AuthenticationError(message))
            }
            Some(message) => Err(ProviderError::RequestFailed(format!(
                "LibreTranslate error: {}",
                message
            ))),
            None => Err(ProviderError::MalformedResponse(
                "response missing translatedText".to_string(),
            )),
        }
    }

    /// Translate one chunk, failing over between instances.
    ///
    /// Attempts are bounded by the pool size. Each instance gets a health
    /// probe first; a probe or request failure marks it failed and moves
    /// on. When every instance is failed, the failure set is cleared once
    /// and the cycle restarts from the head of the pool.
    async fn translate_with_failover(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        let max_attempts = self.pool.len();
        let mut reset_used = false;
        let mut last_error = ProviderError::RequestFailed("no instances configured".to_string());

        for _ in 0..max_attempts {
            let selected = self.pool.select_available().or_else(|| {
                if reset_used {
                    return None;
                }
                reset_used = true;
                self.status
                    .emit("libretranslate: every instance failed, resetting failure tracking");
                self.pool.reset_failures();
                self.pool.select_available()
            });
            let Some(base) = selected else { break };

            if !self.probe(&base).await {
                self.status
                    .emit(&format!("libretranslate: instance {} failed health check", base));
                self.pool.mark_failed(&base);
                last_error = ProviderError::InstanceUnreachable {
                    url: base,
                    reason: "health check failed".to_string(),
                };
                continue;
            }

            match self.request_chunk(&base, text, from, to).await {
                Ok(translated) => return Ok(translated),
                Err(e) => {
                    self.status
                        .emit(&format!("libretranslate: instance {} failed: {}", base, e));
                    self.pool.mark_failed(&base);
                    last_error = e;
                    tokio::time::sleep(FAILOVER_DELAY).await;
                }
            }
        }

        Err(ProviderError::AllInstancesExhausted {
            attempts: max_attempts,
            last_error: last_error.to_string(),
        })
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslate {
    fn name(&self) -> &str {
        "libretranslate"
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
            "libretranslate",
            |chunk| {
                let from = from.clone();
                let to = to.clone();
                Box::pin(async move { self.translate_with_failover(&chunk, &from, &to).await })
            },
        )
        .await
    }
}
