//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables: `WEFT_TEMPLATES__BASE_DIR=views`
//! 3. Config file: `--config FILE`, else [`AppConfig::config_path`] if present
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Template composition settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Prefix joined to every template name before reading.
    pub base_dir: String,
    /// Reuse composed sets for repeated roots.
    pub cache: bool,
    /// Fail rendering on missing fields.
    pub strict: bool,
    /// HTML-escape `{{expr}}` output.
    pub escape_html: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            templates: TemplateConfig {
                base_dir: String::new(),
                cache: true,
                strict: false,
                escape_html: true,
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix("WEFT"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> CliResult<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("templates.base_dir", defaults.templates.base_dir)
            .and_then(|b| b.set_default("templates.cache", defaults.templates.cache))
            .and_then(|b| b.set_default("templates.strict", defaults.templates.strict))
            .and_then(|b| b.set_default("templates.escape_html", defaults.templates.escape_html))
            .and_then(|b| b.set_default("output.no_color", defaults.output.no_color))
            .map_err(|e| config_error("Invalid configuration default", e))?
            .add_source(File::from(path).required(required))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| config_error(format!("Failed to load {}", path.display()), e))?;

        settings
            .try_deserialize()
            .map_err(|e| config_error("Invalid configuration value", e))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.weft.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "weft", "weft")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".weft.toml"))
    }
}

fn config_error(message: impl Into<String>, e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: format!("{}: {e}", message.into()),
        source: Some(Box::new(e)),
    }
}
