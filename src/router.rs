/*!
 * Provider registry and top-level translation entry point.
 *
 * The router owns one adapter per backend, a current-provider pointer
 * that persists across calls, and a fixed fallback priority order. A
 * call validates the language pair against the current provider
 * (switching to a supporting one when needed), delegates, and on failure
 * sweeps the remaining providers in priority order. Only total
 * exhaustion surfaces to the caller.
 */

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::app_config::Config;
use crate::errors::{ProviderFailure, TranslationError};
use crate::language_map::language_display_name;
use crate::providers::baidu::Baidu;
use crate::providers::deepl::DeepL;
use crate::providers::google::GoogleTranslate;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::microsoft::Microsoft;
use crate::providers::mymemory::MyMemory;
use crate::providers::TranslationProvider;
use crate::status::{log_status, StatusHandle};

/// Fallback priority, deliberately distinct from registration order
const FALLBACK_ORDER: [&str; 6] = [
    "libretranslate",
    "mymemory",
    "google",
    "deepl",
    "microsoft",
    "baidu",
];

const DEFAULT_PROVIDER: &str = "libretranslate";

/// Routes translation requests across interchangeable providers
pub struct TranslationRouter {
    /// Registered providers, in registration order
    providers: Vec<Arc<dyn TranslationProvider>>,
    /// Name of the provider used for the next call
    current: RwLock<String>,
    /// Advisory status channel
    status: StatusHandle,
}

impl TranslationRouter {
    /// Build the six standard providers from configuration
    pub fn from_config(config: &Config, status: StatusHandle) -> Self {
        let mut libretranslate = LibreTranslate::new(status.clone());
        if let Some(key) = &config.libretranslate.api_key {
            libretranslate.set_api_key(key);
        }
        for url in &config.libretranslate.custom_instances {
            libretranslate.add_instance(url);
        }
        if let Some(primary) = &config.libretranslate.primary_instance {
            libretranslate.set_primary_instance(primary);
        }

        let mut mymemory = MyMemory::new(status.clone());
        if let Some(endpoint) = &config.mymemory.endpoint {
            mymemory.set_endpoint(endpoint);
        }

        let mut google = GoogleTranslate::new(status.clone());
        if let Some(key) = &config.google.api_key {
            google.set_api_key(key);
        }
        if let Some(base_url) = &config.google.base_url {
            google.set_base_url(base_url);
        }
        if let Some(endpoint) = &config.google.web_endpoint {
            google.set_web_endpoint(endpoint);
        }
        if let Some(prefer_web) = config.google.prefer_web {
            google.set_prefer_web(prefer_web);
        }

        let mut deepl = DeepL::new(status.clone());
        if let Some(key) = &config.deepl.api_key {
            deepl.set_api_key(key);
        }

        let mut baidu = Baidu::new(status.clone());
        if let (Some(app_id), Some(secret_key)) =
            (&config.baidu.app_id, &config.baidu.secret_key)
        {
            baidu.set_credentials(app_id, secret_key);
        }

        let mut microsoft = Microsoft::new(status.clone());
        if let Some(key) = &config.microsoft.api_key {
            microsoft.set_credentials(key, &config.microsoft.region);
        }

        let providers: Vec<Arc<dyn TranslationProvider>> = vec![
            Arc::new(libretranslate),
            Arc::new(mymemory),
            Arc::new(google),
            Arc::new(deepl),
            Arc::new(baidu),
            Arc::new(microsoft),
        ];

        let current = if providers.iter().any(|p| p.name() == config.default_provider) {
            config.default_provider.clone()
        } else {
            DEFAULT_PROVIDER.to_string()
        };

        Self {
            providers,
            current: RwLock::new(current),
            status,
        }
    }

    /// Build with default configuration and log-backed status
    pub fn with_defaults() -> Self {
        Self::from_config(&Config::default(), log_status())
    }

    /// Build over an explicit provider set; the first becomes current.
    ///
    /// Intended for hosts with custom adapters and for tests.
    pub fn with_providers(
        providers: Vec<Arc<dyn TranslationProvider>>,
        status: StatusHandle,
    ) -> Self {
        let current = providers
            .first()
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        Self {
            providers,
            current: RwLock::new(current),
            status,
        }
    }

    fn provider(&self, name: &str) -> Option<&Arc<dyn TranslationProvider>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    /// Registered provider names, in registration order
    pub fn available_providers(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Name of the provider the next call will use
    pub fn current_provider(&self) -> String {
        self.current.read().clone()
    }

    /// Select a provider by name. Unknown names are a no-op returning false.
    pub fn set_provider(&self, name: &str) -> bool {
        if self.provider(name).is_none() {
            return false;
        }
        *self.current.write() = name.to_string();
        self.status
            .emit(&format!("translation provider set to {}", name));
        true
    }

    /// Supported languages of one provider, or the intersection across
    /// all providers that declare an explicit non-empty list.
    pub fn supported_languages(&self, provider: Option<&str>) -> Vec<String> {
        match provider {
            Some(name) => self
                .provider(name)
                .map(|p| p.supported_languages())
                .unwrap_or_default(),
            None => {
                let mut common: Option<BTreeSet<String>> = None;
                for provider in &self.providers {
                    let declared = provider.supported_languages();
                    if declared.is_empty() {
                        // No explicit list: excluded from the intersection
                        continue;
                    }
                    let declared: BTreeSet<String> = declared.into_iter().collect();
                    common = Some(match common {
                        None => declared,
                        Some(common) => common.intersection(&declared).cloned().collect(),
                    });
                }
                common.map(|c| c.into_iter().collect()).unwrap_or_default()
            }
        }
    }

    /// Whether a language pair is handled by the named provider, or by
    /// any registered provider when no name is given.
    pub fn is_language_supported(&self, from: &str, to: &str, provider: Option<&str>) -> bool {
        match provider {
            Some(name) => self
                .provider(name)
                .map(|p| p.is_language_supported(from) && p.is_language_supported(to))
                .unwrap_or(false),
            None => self
                .providers
                .iter()
                .any(|p| p.is_language_supported(from) && p.is_language_supported(to)),
        }
    }

    /// Switch to a provider supporting the pair when the current one
    /// does not. With no supporting provider the current one is kept;
    /// unknown pairs are allowed to proceed rather than rejected.
    fn ensure_supporting_provider(&self, from: &str, to: &str) {
        let current_name = self.current_provider();
        if let Some(current) = self.provider(&current_name) {
            if current.is_language_supported(from) && current.is_language_supported(to) {
                return;
            }
        }

        for provider in &self.providers {
            if provider.is_language_supported(from) && provider.is_language_supported(to) {
                self.status.emit(&format!(
                    "switching provider to {} for {} -> {} ({} -> {})",
                    provider.name(),
                    from,
                    to,
                    language_display_name(from),
                    language_display_name(to),
                ));
                *self.current.write() = provider.name().to_string();
                return;
            }
        }

        self.status.emit(&format!(
            "no provider explicitly supports {} -> {}, trying {} anyway",
            from, to, current_name
        ));
    }

    /// Fallback sweep order: the fixed priority list first, then any
    /// remaining providers in registration order, excluding `active`.
    fn fallback_names(&self, active: &str) -> Vec<String> {
        let mut names: Vec<String> = FALLBACK_ORDER
            .iter()
            .copied()
            .filter(|name| *name != active && self.provider(name).is_some())
            .map(|name| name.to_string())
            .collect();
        for provider in &self.providers {
            let name = provider.name();
            if name != active && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Translate text between two canonical language codes.
    ///
    /// Empty or whitespace-only input returns an empty string without
    /// touching the network. Provider failures are recovered through the
    /// fallback sweep; only total exhaustion errors out.
    pub async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, TranslationError> {
        if self.providers.is_empty() {
            return Err(TranslationError::NoProviders);
        }
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        self.ensure_supporting_provider(from, to);

        let active = self.current_provider();
        let provider = self
            .provider(&active)
            .ok_or_else(|| TranslationError::UnknownProvider(active.clone()))?;

        self.status
            .emit(&format!("translating {} -> {} with {}", from, to, active));
        let primary_error = match provider.translate(text, from, to).await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };
        self.status
            .emit(&format!("provider {} failed: {}", active, primary_error));

        let mut failures = vec![ProviderFailure {
            provider: active.clone(),
            message: primary_error.to_string(),
        }];

        for name in self.fallback_names(&active) {
            let Some(fallback) = self.provider(&name) else {
                continue;
            };
            self.status
                .emit(&format!("trying fallback provider {}", name));
            match fallback.translate(text, from, to).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    self.status
                        .emit(&format!("fallback provider {} failed: {}", name, e));
                    failures.push(ProviderFailure {
                        provider: name,
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(TranslationError::AllProvidersExhausted(failures))
    }
}
