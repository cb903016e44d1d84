/*!
 * Mock provider implementations for testing
 *
 * Scripted providers implement the TranslationProvider trait without any
 * network access, with a call counter to assert how often the router
 * actually invoked each backend.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use lingoswitch::errors::ProviderError;
use lingoswitch::providers::TranslationProvider;

/// Behavior mode for a scripted provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, tagging the output with the target language
    Working,
    /// Always fails with a request error
    Failing,
    /// Always fails with a quota error
    QuotaLimited,
}

/// Scripted provider for routing tests
#[derive(Debug)]
pub struct ScriptedProvider {
    name: String,
    supported: Vec<String>,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Create a provider with an explicit supported-language list.
    ///
    /// An empty list means "declares no list" and is treated as
    /// supporting everything, like the real fail-soft providers.
    pub fn new(name: &str, supported: &[&str], behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            supported: supported.iter().map(|s| s.to_string()).collect(),
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    /// How many translate calls this provider received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_languages(&self) -> Vec<String> {
        self.supported.clone()
    }

    fn is_language_supported(&self, code: &str) -> bool {
        self.supported.is_empty() || self.supported.iter().any(|c| c == code)
    }

    async fn translate(
        &self,
        text: &str,
        _from: &str,
        to: &str,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Working => Ok(format!("[{}] {}", to, text)),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(format!(
                "{} scripted failure",
                self.name
            ))),
            MockBehavior::QuotaLimited => Err(ProviderError::QuotaExceeded(format!(
                "{} daily quota exhausted",
                self.name
            ))),
        }
    }
}
