use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration module
/// This module holds provider credentials and endpoint overrides,
/// loadable from a JSON file and from well-known environment variables.
/// Credentials live in memory only for the lifetime of the router.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Provider used for the first call
    #[serde(default = "default_provider_name")]
    pub default_provider: String,

    /// LibreTranslate settings
    #[serde(default)]
    pub libretranslate: LibreTranslateConfig,

    /// MyMemory settings
    #[serde(default)]
    pub mymemory: MyMemoryConfig,

    /// Google Translate settings
    #[serde(default)]
    pub google: GoogleConfig,

    /// DeepL settings
    #[serde(default)]
    pub deepl: DeepLConfig,

    /// Baidu Translate settings
    #[serde(default)]
    pub baidu: BaiduConfig,

    /// Microsoft Translator settings
    #[serde(default)]
    pub microsoft: MicrosoftConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: default_provider_name(),
            libretranslate: LibreTranslateConfig::default(),
            mymemory: MyMemoryConfig::default(),
            google: GoogleConfig::default(),
            deepl: DeepLConfig::default(),
            baidu: BaiduConfig::default(),
            microsoft: MicrosoftConfig::default(),
        }
    }
}

fn default_provider_name() -> String {
    "libretranslate".to_string()
}

fn default_region() -> String {
    "global".to_string()
}

/// LibreTranslate configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LibreTranslateConfig {
    /// API key for the official hosted instance
    #[serde(default)]
    pub api_key: Option<String>,

    /// Extra instances appended after existing custom instances
    #[serde(default)]
    pub custom_instances: Vec<String>,

    /// Instance placed at the front of the pool
    #[serde(default)]
    pub primary_instance: Option<String>,
}

/// MyMemory configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MyMemoryConfig {
    /// Custom endpoint replacing the public one
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Google Translate configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GoogleConfig {
    /// Google Cloud API key for the official path
    #[serde(default)]
    pub api_key: Option<String>,

    /// Official API base URL override
    #[serde(default)]
    pub base_url: Option<String>,

    /// Web-widget endpoint override
    #[serde(default)]
    pub web_endpoint: Option<String>,

    /// Force which path is tried first
    #[serde(default)]
    pub prefer_web: Option<bool>,
}

/// DeepL configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DeepLConfig {
    /// DeepL API key
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Baidu Translate configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BaiduConfig {
    /// Application identifier
    #[serde(default)]
    pub app_id: Option<String>,

    /// Shared secret for request signing
    #[serde(default)]
    pub secret_key: Option<String>,
}

/// Microsoft Translator configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MicrosoftConfig {
    /// Azure subscription key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Azure resource region
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for MicrosoftConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            region: default_region(),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Defaults plus any environment overrides
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Fill credentials and endpoints from well-known environment
    /// variables, keeping any value already present in the file.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(provider) = env_string("LINGOSWITCH_PROVIDER") {
            self.default_provider = provider;
        }
        if self.libretranslate.api_key.is_none() {
            self.libretranslate.api_key = env_string("LIBRETRANSLATE_API_KEY");
        }
        if self.libretranslate.primary_instance.is_none() {
            self.libretranslate.primary_instance = env_string("LIBRETRANSLATE_URL");
        }
        if self.mymemory.endpoint.is_none() {
            self.mymemory.endpoint = env_string("MYMEMORY_URL");
        }
        if self.google.api_key.is_none() {
            self.google.api_key = env_string("GOOGLE_API_KEY");
        }
        if self.google.web_endpoint.is_none() {
            self.google.web_endpoint = env_string("GOOGLE_TRANSLATE_URL");
        }
        if self.deepl.api_key.is_none() {
            self.deepl.api_key = env_string("DEEPL_API_KEY");
        }
        if self.baidu.app_id.is_none() {
            self.baidu.app_id = env_string("BAIDU_APP_ID");
        }
        if self.baidu.secret_key.is_none() {
            self.baidu.secret_key = env_string("BAIDU_SECRET_KEY");
        }
        if self.microsoft.api_key.is_none() {
            self.microsoft.api_key = env_string("AZURE_TRANSLATOR_KEY");
        }
        if let Some(region) = env_string("AZURE_TRANSLATOR_REGION") {
            self.microsoft.region = region;
        }
        self
    }
}
