// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Structure Errors
    // ========================================================================
    #[error("Project structure is empty")]
    EmptyStructure,

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Path escapes the project root: {path}")]
    PathOutsideRoot { path: String },

    #[error("File '{path}' is written into a directory that is never created")]
    OrphanFile { path: String },

    #[error("Failed to serialize {file}: {reason}")]
    SerializationFailed { file: &'static str, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration(msg) => vec![
                "Check your project options".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("'{}' must be provided", field),
                "Example: expresso new my-server".into(),
            ],
            Self::EmptyStructure
            | Self::DuplicatePath { .. }
            | Self::PathOutsideRoot { .. }
            | Self::OrphanFile { .. }
            | Self::SerializationFailed { .. } => vec![
                "The generated project layout is inconsistent".into(),
                "This appears to be a bug in Expresso, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration(_) | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
