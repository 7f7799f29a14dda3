// file: src/exporter/json.rs
// description: Normalized JSON snapshot export with deterministic key order
// reference: https://docs.rs/serde_json

use crate::error::{PostmortemError, Result};
use crate::models::Incident;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .map_err(|e| PostmortemError::file_operation(&output_dir, e))?;
        Ok(Self { output_dir })
    }

    /// Writes `postmortem-<incident_id>.json`.
    pub fn export(&self, incident: &Incident) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(format!("postmortem-{}.json", incident.incident_id));
        fs::write(&path, to_json_string(incident)?)
            .map_err(|e| PostmortemError::file_operation(&path, e))?;

        info!("Exported JSON snapshot to {}", path.display());
        Ok(path)
    }
}

/// The full record as pretty JSON, keys sorted at every level, newline-terminated.
pub fn to_json_string(incident: &Incident) -> Result<String> {
    let value =
        serde_json::to_value(incident).map_err(|e| PostmortemError::Serialization(e.to_string()))?;
    let mut text = serde_json::to_string_pretty(&sort_keys(value))
        .map_err(|e| PostmortemError::Serialization(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
