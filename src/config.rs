// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PostmortemError, Result};
use crate::renderer::{DEFAULT_TEMPLATES_DIR, DEFAULT_TEMPLATE};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "IPG";
pub const DEFAULT_OUTPUT_DIR: &str = "out";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Write the JSON snapshot alongside the Markdown.
    pub json: bool,
    /// Write the action item CSV alongside the Markdown.
    pub csv: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub directory: PathBuf,
    pub name: String,
}

impl Config {
    /// Layers built-in defaults, the optional TOML file and `IPG__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder()
            .set_default("output.directory", DEFAULT_OUTPUT_DIR)
            .and_then(|b| b.set_default("output.json", true))
            .and_then(|b| b.set_default("output.csv", true))
            .and_then(|b| b.set_default("templates.directory", DEFAULT_TEMPLATES_DIR))
            .and_then(|b| b.set_default("templates.name", DEFAULT_TEMPLATE))
            .map_err(|e| PostmortemError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PostmortemError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PostmortemError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            output: OutputConfig {
                directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
                json: true,
                csv: true,
            },
            templates: TemplateConfig {
                directory: PathBuf::from(DEFAULT_TEMPLATES_DIR),
                name: DEFAULT_TEMPLATE.to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.templates.name.trim().is_empty() {
            return Err(PostmortemError::Config(
                "templates.name must not be empty".to_string(),
            ));
        }

        if self.templates.directory.as_os_str().is_empty() {
            return Err(PostmortemError::Config(
                "templates.directory must not be empty".to_string(),
            ));
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(PostmortemError::Config(
                "output.directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
