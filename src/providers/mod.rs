/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported online
 * translation backends:
 * - LibreTranslate: open-source service with many public instances
 * - MyMemory: free service with a daily quota
 * - Google: official Cloud API or the unauthenticated web endpoint
 * - DeepL: official API with a web JSON-RPC fallback
 * - Baidu: signed API with an unauthenticated suggestion fallback
 * - Microsoft: Azure Cognitive Services Translator
 */

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::ProviderError;

pub mod baidu;
pub mod deepl;
pub mod google;
pub mod libretranslate;
pub mod microsoft;
pub mod mymemory;

/// User agent presented to every backend
pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Timeout for lightweight health probes
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for translation requests
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Common trait for all translation providers.
///
/// Object safe so the router can hold a registry of interchangeable
/// backends and move between them at runtime.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Stable lowercase provider name used for registry lookup
    fn name(&self) -> &str;

    /// The provider's advertised supported-language codes.
    ///
    /// An empty list means the provider declares no explicit list and is
    /// assumed to support any code.
    fn supported_languages(&self) -> Vec<String>;

    /// Whether this provider can handle the given canonical code
    fn is_language_supported(&self, code: &str) -> bool;

    /// Translate `text` between the given canonical language codes
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, ProviderError>;
}

/// Shared HTTP client construction for provider adapters
pub(crate) fn http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
}

/// Map a transport-level reqwest failure onto the provider taxonomy
pub(crate) fn transport_error(url: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() {
        ProviderError::InstanceUnreachable {
            url: url.to_string(),
            reason: error.to_string(),
        }
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

/// Convert a non-success HTTP response into an ApiError with a body excerpt
pub(crate) async fn api_error(response: reqwest::Response) -> ProviderError {
    let status_code = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "failed to read error response body".to_string());
    let excerpt: String = message.chars().take(200).collect();
    ProviderError::ApiError {
        status_code,
        message: excerpt,
    }
}
