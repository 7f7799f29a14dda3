// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod renderer;
pub mod utils;
pub mod validator;

#[cfg(test)]
mod fixtures;

pub use config::{Config, OutputConfig, TemplateConfig};
pub use error::{FieldError, PostmortemError, Result, ValidationErrors};
pub use exporter::{CsvExporter, JsonExporter, to_csv_string, to_json_string};
pub use models::{Incident, IncidentMetrics};
pub use parser::{IncidentLoader, InputFormat, load_incident};
pub use pipeline::{GenerateOptions, GeneratedFiles, PostmortemPipeline};
pub use renderer::{DEFAULT_TEMPLATE, MarkdownRenderer};
pub use validator::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let options = GenerateOptions::from_config(&config);
        assert_eq!(options.template, DEFAULT_TEMPLATE);
        let _renderer = MarkdownRenderer::new(options.templates_dir);
    }
}
