//! Configuration loading for codepad
//!
//! Handles loading and parsing configuration using the config crate. Sources
//! are layered: embedded defaults, then an optional file, then `CODEPAD_*`
//! environment variables.

use std::path::Path;

use config::{Config as ConfigBuilder, Environment, File, FileFormat, Map};
use tracing::debug;

use crate::config::{Config, ConfigError, ENV_PREFIX, EXAMPLE_CONFIG};

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = ConfigBuilder::builder()
            .add_source(File::from(path))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config = ConfigBuilder::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load the layered configuration: defaults, optional file, process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`Config::load`], reading variables from `env` instead of the
    /// process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(File::from_str(EXAMPLE_CONFIG, FileFormat::Toml));

        if let Some(path) = path {
            debug!(?path, "adding configuration file");
            builder = builder.add_source(File::from(path));
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let config: Config = builder.add_source(environment).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.service.url.trim().is_empty() {
            return Err(ConfigError::Invalid("service url is empty".to_owned()));
        }
        if self.service.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "service timeout must be at least one second".to_owned(),
            ));
        }
        if self.save.base_name.is_empty() || self.save.base_name.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "save base name '{}' is not a plain file name",
                self.save.base_name
            )));
        }

        for (language, mapping) in &self.languages {
            if mapping.token.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "language '{language}' has empty token"
                )));
            }
            if mapping.extension.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "language '{language}' has empty extension"
                )));
            }
        }

        Ok(())
    }
}
