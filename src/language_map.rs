/*!
 * Language code mapping.
 *
 * Translation backends disagree about language identifiers ("zh-Hans",
 * "zh-CN", "jp", "ZH", ...). This module performs the two-stage mapping
 * from the application-wide canonical code to a provider-specific code:
 * a shared canonicalization table first (regional variants collapse to
 * their base code), then a per-provider override table. Both lookups are
 * fail-soft: an unmapped code passes through unchanged, never an error.
 */

use std::collections::HashMap;

use isolang::Language;
use once_cell::sync::Lazy;

/// Regional and script variants collapsed to their canonical base code
static CANONICAL: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("zh-CN", "zh"),
        ("zh-TW", "zh"),
        ("zh-Hans", "zh"),
        ("zh-Hant", "zh"),
        ("pt-BR", "pt"),
        ("en-US", "en"),
        ("en-GB", "en"),
    ])
});

/// Two-stage code mapper owned by each provider adapter
#[derive(Debug, Clone)]
pub struct LanguageMapper {
    overrides: HashMap<&'static str, &'static str>,
    supported: Vec<String>,
}

impl LanguageMapper {
    /// Build a mapper from a provider's override table.
    ///
    /// The table's value set doubles as the provider's advertised
    /// supported-language list.
    pub fn new(overrides: &'static [(&'static str, &'static str)]) -> Self {
        let overrides: HashMap<_, _> = overrides.iter().copied().collect();
        let mut supported: Vec<String> =
            overrides.values().map(|v| (*v).to_string()).collect();
        supported.sort_unstable();
        supported.dedup();
        Self { overrides, supported }
    }

    /// Mapper with no provider-specific overrides and no advertised list
    pub fn permissive() -> Self {
        Self { overrides: HashMap::new(), supported: Vec::new() }
    }

    /// Map a canonical code to the provider-specific code.
    ///
    /// Deterministic and total: unknown codes pass through unchanged.
    pub fn map(&self, code: &str) -> String {
        let base = CANONICAL.get(code).copied().unwrap_or(code);
        self.overrides.get(base).copied().unwrap_or(base).to_string()
    }

    /// The provider's advertised supported-language codes, sorted
    pub fn supported_codes(&self) -> &[String] {
        &self.supported
    }

    /// Whether the mapped code appears in the advertised list.
    ///
    /// A provider with no explicit list is assumed to support everything,
    /// so an unknown code never blocks an otherwise-working call.
    pub fn is_supported(&self, code: &str) -> bool {
        if self.supported.is_empty() {
            return true;
        }
        self.supported.contains(&self.map(code))
    }
}

/// Human-readable language name for status lines, falling back to the code
pub fn language_display_name(code: &str) -> String {
    let base = CANONICAL.get(code).copied().unwrap_or(code);
    let name = match base.len() {
        2 => Language::from_639_1(&base.to_lowercase()).map(|l| l.to_name()),
        3 => Language::from_639_3(&base.to_lowercase()).map(|l| l.to_name()),
        _ => None,
    };
    name.map(|n| n.to_string()).unwrap_or_else(|| code.to_string())
}
