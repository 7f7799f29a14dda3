// file: src/exporter/action_items.rs
// description: CSV export of an incident's action items
// reference: https://docs.rs/csv

use crate::error::{PostmortemError, Result};
use crate::models::{Incident, Variant};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const CSV_HEADER: [&str; 9] = [
    "id",
    "title",
    "owner",
    "priority",
    "due",
    "type",
    "status",
    "success_criteria",
    "links",
];

#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .map_err(|e| PostmortemError::file_operation(&output_dir, e))?;
        Ok(Self { output_dir })
    }

    /// Writes `action_items-<incident_id>.csv`.
    pub fn export(&self, incident: &Incident) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(format!("action_items-{}.csv", incident.incident_id));
        fs::write(&path, to_csv_string(incident)?)
            .map_err(|e| PostmortemError::file_operation(&path, e))?;

        info!(
            "Exported {} action items to {}",
            incident.action_items.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Header plus one row per action item, CRLF-terminated for spreadsheet imports.
pub fn to_csv_string(incident: &Incident) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for item in &incident.action_items {
        let due = item.due.format("%Y-%m-%d").to_string();
        let links = item.joined_links();
        writer
            .write_record([
                item.id.as_str(),
                item.title.as_str(),
                item.owner.as_str(),
                item.priority.as_str(),
                due.as_str(),
                item.kind.as_str(),
                item.status.as_str(),
                item.success_criteria.as_deref().unwrap_or(""),
                links.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PostmortemError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PostmortemError::Serialization(e.to_string()))
}

fn csv_error(e: csv::Error) -> PostmortemError {
    PostmortemError::Serialization(format!("CSV write failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{minimal_incident, sample_incident};
    use crate::validator::Validator;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_rows_match_action_items() {
        let incident = Validator::validate_value(&sample_incident()).unwrap();
        let text = to_csv_string(&incident).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "id,title,owner,priority,due,type,status,success_criteria,links",
                "AI-1,Validate pool size in CI,payments,P1,2024-02-01,prevention,open,CI rejects pool size < 10,ticket: https://tracker.example.com/PAY-1",
                "AI-2,Alert on pool saturation,sre,P2,2024-02-15,detection,in_progress,,",
            ]
        );
        assert!(text.ends_with("\r\n"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut incident = Validator::validate_value(&minimal_incident()).unwrap();
        incident.action_items[0].title = "Fix, then verify".to_string();

        let text = to_csv_string(&incident).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let row = reader.records().next().unwrap().unwrap();

        assert_eq!(&row[1], "Fix, then verify");
        assert_eq!(&row[3], incident.action_items[0].priority.as_str());
    }

    #[test]
    fn test_header_only_without_action_items() {
        let mut incident = Validator::validate_value(&minimal_incident()).unwrap();
        incident.action_items.clear();

        let text = to_csv_string(&incident).unwrap();
        assert_eq!(text, format!("{}\r\n", CSV_HEADER.join(",")));
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let incident = Validator::validate_value(&minimal_incident()).unwrap();

        let path = exporter.export(&incident).unwrap();
        assert_eq!(path, dir.path().join("action_items-INC-7.csv"));
        assert_eq!(fs::read_to_string(path).unwrap().lines().count(), 2);
    }
}
