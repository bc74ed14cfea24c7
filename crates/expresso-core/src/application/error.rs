//! Application layer errors.
//!
//! These errors represent failures in orchestration, not scaffolding logic.
//! Scaffolding errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A registry lookup failed. Recovered as a `null` version.
    #[error("Could not resolve a version for '{package}': {reason}")]
    RegistryLookup { package: String, reason: String },

    /// The reporter could not write to the console.
    #[error("Failed to report progress: {reason}")]
    ReporterFailed { reason: String },

    /// Adapter state could not be accessed (lock poisoned, etc.).
    #[error("Adapter lock poisoned: {name}")]
    LockPoisoned { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "A partially written project may remain and can be deleted".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or pass --on-existing skip to leave it untouched".into(),
            ],
            Self::RegistryLookup { package, .. } => vec![
                format!("Check that '{}' exists on the registry", package),
                "Use --offline to skip registry lookups".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::RegistryLookup { .. } => ErrorCategory::NotFound,
            Self::ReporterFailed { .. } | Self::LockPoisoned { .. } => ErrorCategory::Internal,
        }
    }
}
