// file: src/renderer/markdown.rs
// description: Renders validated incidents into postmortem Markdown documents
// reference: https://docs.rs/handlebars

use super::helpers;
use crate::error::{PostmortemError, Result};
use crate::models::{Incident, IncidentMetrics};
use handlebars::Handlebars;
use serde_json::json;
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Looked up relative to the working directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_TEMPLATE: &str = "default.md.j2";

/// Compiled into the binary; used when the template directory has no `default.md.j2`.
pub const BUNDLED_DEFAULT_TEMPLATE: &str = include_str!("../../templates/default.md.j2");

pub struct MarkdownRenderer {
    templates_dir: PathBuf,
    registry: Handlebars<'static>,
}

impl MarkdownRenderer {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut registry);

        Self {
            templates_dir: templates_dir.into(),
            registry,
        }
    }

    pub fn bundled() -> Self {
        Self::new(DEFAULT_TEMPLATES_DIR)
    }

    /// A file in the template directory wins over the compiled-in default.
    fn template_source(&self, template_name: &str) -> Result<Cow<'static, str>> {
        let path = self.templates_dir.join(template_name);
        match fs::read_to_string(&path) {
            Ok(source) => {
                debug!("Rendering template {}", path.display());
                Ok(Cow::Owned(source))
            }
            Err(e) if e.kind() == ErrorKind::NotFound && template_name == DEFAULT_TEMPLATE => {
                debug!("{} not found, using bundled default template", path.display());
                Ok(Cow::Borrowed(BUNDLED_DEFAULT_TEMPLATE))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PostmortemError::TemplateNotFound(path)),
            Err(e) => Err(PostmortemError::file_operation(&path, e)),
        }
    }

    /// Renders `template_name` from the template directory.
    ///
    /// Referencing a field the record does not have is an error, and the
    /// output always ends with exactly one newline.
    pub fn render(&self, incident: &Incident, template_name: &str) -> Result<String> {
        let source = self.template_source(template_name)?;

        let context = json!({
            "incident": serde_json::to_value(incident)
                .map_err(|e| PostmortemError::Serialization(e.to_string()))?,
            "metrics": serde_json::to_value(IncidentMetrics::from_window(&incident.time))
                .map_err(|e| PostmortemError::Serialization(e.to_string()))?,
        });

        let rendered = self
            .registry
            .render_template(&source, &context)
            .map_err(|e| PostmortemError::Render(format!("{}: {}", template_name, e)))?;

        Ok(format!("{}\n", rendered.trim_end()))
    }

    /// Renders and writes `postmortem-<incident_id>.md` into `out_dir`.
    pub fn write(&self, incident: &Incident, template_name: &str, out_dir: &Path) -> Result<PathBuf> {
        let markdown = self.render(incident, template_name)?;

        fs::create_dir_all(out_dir).map_err(|e| PostmortemError::file_operation(out_dir, e))?;
        let path = out_dir.join(format!("postmortem-{}.md", incident.incident_id));
        fs::write(&path, markdown).map_err(|e| PostmortemError::file_operation(&path, e))?;

        info!("Wrote postmortem to {}", path.display());
        Ok(path)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::bundled()
    }
}
