// file: src/parser/loader.rs
// description: Reads incident files and parses YAML or JSON into a generic mapping
// reference: https://docs.rs/serde_json, https://docs.rs/yaml-rust

use super::yaml;
use crate::error::{PostmortemError, Result};
use crate::models::Incident;
use crate::validator::Validator;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};
use yaml_rust::YamlLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Yaml,
    Json,
}

impl InputFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return Err(PostmortemError::MissingExtension(path.to_path_buf()));
        };

        match extension.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Ok(InputFormat::Yaml),
            "json" => Ok(InputFormat::Json),
            other => Err(PostmortemError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Yaml => "YAML",
            InputFormat::Json => "JSON",
        }
    }
}

pub struct IncidentLoader;

impl IncidentLoader {
    /// Loads and validates an incident file.
    pub fn load(path: &Path) -> Result<Incident> {
        let raw = Self::read_document(path)?;
        Validator::validate(&raw)
    }

    pub fn read_document(path: &Path) -> Result<Map<String, Value>> {
        let format = InputFormat::from_path(path)?;
        info!("Loading {} incident from {}", format.name(), path.display());

        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PostmortemError::InputNotFound(path.to_path_buf()),
            _ => PostmortemError::InputRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse_document(&text, format)
    }

    /// Parses document text; the root must be a mapping.
    pub fn parse_document(text: &str, format: InputFormat) -> Result<Map<String, Value>> {
        let root = match format {
            InputFormat::Yaml => {
                let docs =
                    YamlLoader::load_from_str(text).map_err(|e| PostmortemError::Syntax {
                        format: format.name(),
                        message: e.to_string(),
                    })?;
                docs.first().map(yaml::to_json).unwrap_or(Value::Null)
            }
            InputFormat::Json => {
                serde_json::from_str(text).map_err(|e| PostmortemError::Syntax {
                    format: format.name(),
                    message: e.to_string(),
                })?
            }
        };

        match root {
            Value::Object(map) => {
                debug!("Parsed {} document with {} top-level keys", format.name(), map.len());
                Ok(map)
            }
            _ => Err(PostmortemError::RootNotMapping(format.name())),
        }
    }
}

pub fn load_incident(path: &Path) -> Result<Incident> {
    IncidentLoader::load(path)
}
