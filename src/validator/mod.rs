// file: src/validator/mod.rs
// description: Schema validation turning a raw value tree into a typed incident
// reference: closed schema with aggregated structural and cross-field errors

pub mod fields;
pub mod invariants;
pub mod schema;

pub use fields::{Decoder, FieldPath};

use crate::error::{PostmortemError, Result};
use crate::models::Incident;
use serde_json::{Map, Value};
use tracing::debug;

pub struct Validator;

impl Validator {
    /// Validates a parsed document root.
    ///
    /// Every structural violation is reported, along with each cross-field
    /// rule broken by a section that otherwise decoded cleanly.
    pub fn validate(raw: &Map<String, Value>) -> Result<Incident> {
        Self::validate_value(&Value::Object(raw.clone()))
    }

    pub fn validate_value(raw: &Value) -> Result<Incident> {
        let mut decoder = Decoder::new();
        let incident = schema::decode_incident(&mut decoder, raw);

        match decoder.finish(incident) {
            Ok(incident) => {
                debug!(
                    "Validated incident {} ({} timeline events, {} action items)",
                    incident.incident_id,
                    incident.timeline.len(),
                    incident.action_items.len()
                );
                Ok(incident)
            }
            Err(errors) => {
                debug!("Incident failed validation with {} errors", errors.len());
                Err(PostmortemError::Validation(errors))
            }
        }
    }
}
