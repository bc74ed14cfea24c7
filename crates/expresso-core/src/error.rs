//! Crate-level error: one type for everything `expresso-core` can return.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone)]
pub enum ExpressoError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Settings handed to the core that it cannot act on.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A broken internal invariant.
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ExpressoError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => {
                vec!["Run `expresso config list` to inspect the effective settings".into()]
            }
            Self::Internal { .. } => vec!["Re-run with -vv and include the log in a bug report".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Broad failure class; the CLI maps it to an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

pub type ExpressoResult<T> = Result<T, ExpressoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn categories_flow_through_layers() {
        let e: ExpressoError = DomainError::MissingRequiredField { field: "app_name" }.into();
        assert_eq!(e.category(), ErrorCategory::Validation);

        let e: ExpressoError = ApplicationError::ProjectExists {
            path: PathBuf::from("demo"),
        }
        .into();
        assert_eq!(e.category(), ErrorCategory::Validation);
        assert!(e.suggestions().iter().any(|s| s.contains("demo")));
    }

    #[test]
    fn failed_write_is_internal() {
        let e: ExpressoError = ApplicationError::FilesystemError {
            path: PathBuf::from("demo/src"),
            reason: "read-only".into(),
        }
        .into();
        assert_eq!(e.category(), ErrorCategory::Internal);
    }

    #[test]
    fn configuration_error_points_at_config_list() {
        let e = ExpressoError::Configuration {
            message: "bad".into(),
        };
        assert_eq!(e.category(), ErrorCategory::Configuration);
        assert!(e.suggestions()[0].contains("config list"));
    }
}
