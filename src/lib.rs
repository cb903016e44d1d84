/*!
 * # lingoswitch
 *
 * A Rust library for translating text through interchangeable online
 * translation providers.
 *
 * ## Features
 *
 * - Six backends behind one trait:
 *   - LibreTranslate (multi-instance, automatic endpoint failover)
 *   - MyMemory (free tier with daily quota detection)
 *   - Google Translate (official API or unauthenticated web endpoint)
 *   - DeepL (official API with a web JSON-RPC fallback)
 *   - Baidu Translate (signed API with a suggestion-endpoint fallback)
 *   - Microsoft Translator (Azure Cognitive Services)
 * - Automatic provider switching for unsupported language pairs
 * - Fixed-priority fallback sweep when a provider fails
 * - Sentence-aware chunking for provider request-size limits
 * - Best-effort decoding of loosely shaped translation payloads
 * - Advisory status channel for host applications
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `router`: Provider registry, selection, and fallback
 * - `providers`: Client implementations for the translation backends
 * - `instances`: Endpoint pool and health tracking for LibreTranslate
 * - `chunking`: Request-size-limited text splitting and reassembly
 * - `extract`: Best-effort JSON payload decoding
 * - `language_map`: Canonical-to-provider language code mapping
 * - `status`: Advisory status channel
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod chunking;
pub mod errors;
pub mod extract;
pub mod instances;
pub mod language_map;
pub mod providers;
pub mod router;
pub mod status;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ProviderError, ProviderFailure, TranslationError};
pub use language_map::LanguageMapper;
pub use providers::TranslationProvider;
pub use router::TranslationRouter;
pub use status::{LogSink, MemorySink, StatusHandle, StatusSink};
