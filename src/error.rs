// file: src/error.rs
// description: Custom error types, validation error lists and exit code mapping
// reference: https://docs.rs/thiserror

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostmortemError>;

/// Process exit code for input and schema failures.
pub const EXIT_INPUT_ERROR: u8 = 2;
/// Process exit code for everything else that goes wrong.
pub const EXIT_UNEXPECTED: u8 = 1;

#[derive(Error, Debug)]
pub enum PostmortemError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read input file: {} ({source})", .path.display())]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input file must have an extension (.yml/.yaml/.json): {}", .0.display())]
    MissingExtension(PathBuf),

    #[error("Unsupported file type: .{0}. Use .yml/.yaml or .json")]
    UnsupportedFormat(String),

    #[error("Invalid {format}: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },

    #[error("{0} root must be a mapping/object.")]
    RootNotMapping(&'static str),

    #[error("Schema validation failed:\n{0}")]
    Validation(ValidationErrors),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Template rendering failed: {0}")]
    Render(String),

    #[error("File operation failed for {}: {source}", .path.display())]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PostmortemError {
    /// Input and schema problems are the operator's to fix; everything else is unexpected.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PostmortemError::InputNotFound(_)
                | PostmortemError::InputRead { .. }
                | PostmortemError::MissingExtension(_)
                | PostmortemError::UnsupportedFormat(_)
                | PostmortemError::Syntax { .. }
                | PostmortemError::RootNotMapping(_)
                | PostmortemError::Validation(_)
        )
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_input_error() {
            EXIT_INPUT_ERROR
        } else {
            EXIT_UNEXPECTED
        }
    }

    pub fn file_operation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PostmortemError::FileOperation {
            path: path.into(),
            source,
        }
    }
}

/// One violated schema rule, addressed by its dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found while validating one incident, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.errors.iter().map(|e| format!("- {}", e)).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display() {
        let errors = ValidationErrors::new(vec![
            FieldError::new("time.mitigated", "must be >= time.detected"),
            FieldError::new("", "bare message"),
        ]);

        assert_eq!(
            errors.to_string(),
            "- time.mitigated: must be >= time.detected\n- bare message"
        );
        assert!(errors.contains_path("time.mitigated"));
        assert!(!errors.contains_path("time"));
    }

    #[test]
    fn test_exit_codes() {
        let validation = PostmortemError::Validation(ValidationErrors::default());
        assert_eq!(validation.exit_code(), EXIT_INPUT_ERROR);

        let missing = PostmortemError::InputNotFound(PathBuf::from("nope.yaml"));
        assert_eq!(missing.exit_code(), EXIT_INPUT_ERROR);

        let template = PostmortemError::TemplateNotFound(PathBuf::from("templates/x.md.j2"));
        assert_eq!(template.exit_code(), EXIT_UNEXPECTED);

        let render = PostmortemError::Render("undefined variable".to_string());
        assert_eq!(render.exit_code(), EXIT_UNEXPECTED);
    }

    #[test]
    fn test_syntax_message() {
        let err = PostmortemError::Syntax {
            format: "YAML",
            message: "bad indentation".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid YAML: bad indentation");
    }
}
