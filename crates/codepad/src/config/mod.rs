use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub use crate::config::language::{FileExtension, Language, LanguageMapping, UnknownLanguage};
use crate::registry::LanguageRegistry;

pub mod language;
mod loader;

/// Example configuration embedded at compile time.
///
/// Library users can access this to generate a starter config file.
pub const EXAMPLE_CONFIG: &str = include_str!("../../codepad.example.toml");

/// Endpoint used when no configuration overrides it
pub const DEFAULT_SERVICE_URL: &str = "https://api.codex.jaagrav.in";

/// Prefix for environment variable overrides (`CODEPAD_SERVICE__URL`, ...)
pub const ENV_PREFIX: &str = "CODEPAD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid characters in file extension")]
    InvalidFileExtChars,

    #[error("failed to parse config: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Config for codepad
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Remote execution service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Presentation settings handed to the editor widget
    #[serde(default)]
    pub editor: EditorConfig,

    /// Naming and placement of saved files
    #[serde(default)]
    pub save: SaveConfig,

    /// Per-language mapping overrides keyed by UI language key
    #[serde(default)]
    pub languages: HashMap<Language, LanguageMapping>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_url")]
    pub url: String,

    /// Upper bound on a single execution request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_font_size")]
    pub font_size: u16,

    /// Language selected when a session starts
    #[serde(default)]
    pub default_language: Language,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            font_size: default_font_size(),
            default_language: Language::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveConfig {
    /// File stem for saved files; the language extension is appended
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Target directory (working directory when unset)
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            base_name: default_base_name(),
            directory: None,
        }
    }
}

impl Config {
    /// Create a new config with the embedded defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the language registry, applying any configured overrides
    pub fn registry(&self) -> LanguageRegistry {
        LanguageRegistry::with_overrides(&self.languages)
    }

    /// Directory saved files are written to
    pub fn save_directory(&self) -> PathBuf {
        self.save
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_toml(EXAMPLE_CONFIG).expect("embedded default config should be valid")
    }
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_theme() -> String {
    "monokai".to_owned()
}

fn default_font_size() -> u16 {
    14
}

fn default_base_name() -> String {
    "saved-code".to_owned()
}
