/*!
 * Error types for the lingoswitch library.
 *
 * This module contains custom error types for the provider and routing
 * layers, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a single translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider does not support one side of the requested pair
    #[error("unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair {
        /// Source language code
        from: String,
        /// Target language code
        to: String,
    },

    /// One endpoint of the provider could not be reached
    #[error("instance unreachable: {url}: {reason}")]
    InstanceUnreachable {
        /// Endpoint base URL
        url: String,
        /// Underlying network failure
        reason: String,
    },

    /// Every endpoint of a multi-instance provider failed within one retry cycle
    #[error("all {attempts} instances failed, last error: {last_error}")]
    AllInstancesExhausted {
        /// Number of attempts made
        attempts: usize,
        /// The last underlying failure
        last_error: String,
    },

    /// The provider reported a rate or quota limit
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The response body could not be decoded or lacked expected fields
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication or missing credentials
    #[error("authentication error: {0}")]
    AuthenticationError(String),
}

/// One provider's failure within a fallback sweep
#[derive(Debug, Clone)]
pub struct ProviderFailure {
    /// Provider name
    pub provider: String,
    /// Failure message
    pub message: String,
}

fn summarize(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.provider, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced by the translation router
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from a single provider, when no fallback applies
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The requested provider name is not registered
    #[error("unknown translation provider: {0}")]
    UnknownProvider(String),

    /// The router has no providers registered
    #[error("no translation providers registered")]
    NoProviders,

    /// Every registered provider failed; carries each underlying cause
    #[error("all translation providers failed: {}", summarize(.0))]
    AllProvidersExhausted(Vec<ProviderFailure>),
}

impl From<anyhow::Error> for TranslationError {
    fn from(error: anyhow::Error) -> Self {
        Self::Provider(ProviderError::RequestFailed(error.to_string()))
    }
}
