// file: src/exporter/mod.rs
// description: JSON snapshot and action item CSV exporters
// reference: internal module structure

pub mod action_items;
pub mod json;

pub use action_items::{CSV_HEADER, CsvExporter, to_csv_string};
pub use json::{JsonExporter, to_json_string};
