// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::Config;
use crate::router::TranslationRouter;
use crate::status::log_status;

mod app_config;
mod chunking;
mod errors;
mod extract;
mod instances;
mod language_map;
mod providers;
mod router;
mod status;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered translation providers
    Providers,

    /// List supported language codes, for one provider or the common set
    Languages {
        /// Provider name (omit for the intersection across providers)
        #[arg(value_name = "PROVIDER")]
        provider: Option<String>,
    },
}

/// lingoswitch - online translation with provider failover
///
/// Translates text through one of several online translation backends,
/// switching providers and endpoints automatically when one misbehaves.
#[derive(Parser, Debug)]
#[command(name = "lingoswitch")]
#[command(version)]
#[command(about = "Translate text through interchangeable online providers")]
#[command(long_about = "Translate text through interchangeable online providers.

EXAMPLES:
    lingoswitch \"Hello, world\" -t zh             # English (default) to Chinese
    lingoswitch \"Bonjour\" -s fr -t en            # Explicit source language
    lingoswitch -p deepl \"Guten Tag\" -t en       # Pin a provider
    lingoswitch providers                          # List providers
    lingoswitch languages google                   # Provider language codes

CONFIGURATION:
    Provider credentials are read from a JSON config file (--config) and
    from environment variables (DEEPL_API_KEY, GOOGLE_API_KEY,
    BAIDU_APP_ID, BAIDU_SECRET_KEY, AZURE_TRANSLATOR_KEY,
    AZURE_TRANSLATOR_REGION, LIBRETRANSLATE_API_KEY, LIBRETRANSLATE_URL,
    MYMEMORY_URL, GOOGLE_TRANSLATE_URL).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Source language code
    #[arg(short, long, default_value = "en")]
    source_language: String,

    /// Target language code
    #[arg(short, long, default_value = "zh")]
    target_language: String,

    /// Translation provider to start with
    #[arg(short, long)]
    provider: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Minimal timestamped stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => {
                    writeln!(stderr, "\x1B[1;31m{} {}\x1B[0m", now, record.args())
                }
                Level::Warn => {
                    writeln!(stderr, "\x1B[1;33m{} {}\x1B[0m", now, record.args())
                }
                _ => writeln!(stderr, "{} {}", now, record.args()),
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    CustomLogger::init(level)?;

    let config = match &options.config {
        Some(path) => Config::from_file(path)?.with_env_overrides(),
        None => Config::from_env(),
    };
    let router = TranslationRouter::from_config(&config, log_status());

    match options.command {
        Some(Commands::Providers) => {
            for name in router.available_providers() {
                println!("{}", name);
            }
            return Ok(());
        }
        Some(Commands::Languages { provider }) => {
            for code in router.supported_languages(provider.as_deref()) {
                println!("{}", code);
            }
            return Ok(());
        }
        None => {}
    }

    let Some(text) = options.text else {
        anyhow::bail!("no text given; see --help for usage");
    };

    if let Some(provider) = &options.provider {
        if !router.set_provider(provider) {
            anyhow::bail!(
                "unknown provider '{}'; available: {}",
                provider,
                router.available_providers().join(", ")
            );
        }
    }

    let translated = router
        .translate(&text, &options.source_language, &options.target_language)
        .await?;
    println!("{}", translated);
    Ok(())
}
