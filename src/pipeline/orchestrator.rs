// file: src/pipeline/orchestrator.rs
// description: coordinates loading, validation, rendering and export of one incident
// reference: load → validate → render → export workflow

use crate::config::Config;
use crate::error::Result;
use crate::exporter::{CsvExporter, JsonExporter};
use crate::models::Incident;
use crate::parser::IncidentLoader;
use crate::renderer::MarkdownRenderer;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where and what to generate for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub template: String,
    pub write_json: bool,
    pub write_csv: bool,
}

impl GenerateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            out_dir: config.output.directory.clone(),
            templates_dir: config.templates.directory.clone(),
            template: config.templates.name.clone(),
            write_json: config.output.json,
            write_csv: config.output.csv,
        }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::from_config(&Config::default_config())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub incident_id: String,
    pub markdown: PathBuf,
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl GeneratedFiles {
    /// Written paths in the order they were produced.
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.markdown.as_path()];
        paths.extend(self.json.as_deref());
        paths.extend(self.csv.as_deref());
        paths
    }
}

pub struct PostmortemPipeline {
    options: GenerateOptions,
    renderer: MarkdownRenderer,
}

impl PostmortemPipeline {
    pub fn new(options: GenerateOptions) -> Self {
        let renderer = MarkdownRenderer::new(options.templates_dir.clone());
        Self { options, renderer }
    }

    /// Loads and validates without writing anything.
    pub fn validate(&self, input: &Path) -> Result<Incident> {
        let incident = IncidentLoader::load(input)?;
        info!("Incident {} is valid", incident.incident_id);
        Ok(incident)
    }

    /// Runs the full pipeline. Exports switched off in the options are never written.
    pub fn generate(&self, input: &Path) -> Result<GeneratedFiles> {
        info!("Generating postmortem from {}", input.display());
        let incident = self.validate(input)?;

        let markdown =
            self.renderer
                .write(&incident, &self.options.template, &self.options.out_dir)?;

        let json = if self.options.write_json {
            Some(JsonExporter::new(&self.options.out_dir)?.export(&incident)?)
        } else {
            debug!("JSON export disabled");
            None
        };

        let csv = if self.options.write_csv {
            Some(CsvExporter::new(&self.options.out_dir)?.export(&incident)?)
        } else {
            debug!("CSV export disabled");
            None
        };

        let files = GeneratedFiles {
            incident_id: incident.incident_id,
            markdown,
            json,
            csv,
        };
        info!(
            "Generated {} files for incident {}",
            files.paths().len(),
            files.incident_id
        );
        Ok(files)
    }
}
