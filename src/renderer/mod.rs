// file: src/renderer/mod.rs
// description: Markdown rendering module exports
// reference: internal module structure

pub mod helpers;
pub mod markdown;

pub use markdown::{BUNDLED_DEFAULT_TEMPLATE, DEFAULT_TEMPLATE, DEFAULT_TEMPLATES_DIR, MarkdownRenderer};
