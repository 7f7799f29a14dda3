// file: src/parser/mod.rs
// description: incident file loading module exports
// reference: internal module structure

pub mod loader;
pub mod yaml;

pub use loader::{IncidentLoader, InputFormat, load_incident};
