//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `expresso-adapters` crate provides the filesystem and registry
//! implementations; the CLI provides the console [`Reporter`].

use crate::error::ExpressoResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `expresso_adapters::filesystem::LocalFilesystem` (production)
/// - `expresso_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ExpressoResult<()>;

    /// Write content to a file, creating or truncating it.
    fn write_file(&self, path: &Path, content: &str) -> ExpressoResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for package version lookup.
///
/// Implemented by:
/// - `expresso_adapters::registry::NpmRegistry` (HTTP, production)
/// - `expresso_adapters::registry::StaticVersions` (offline / testing)
#[cfg_attr(test, mockall::automock)]
pub trait VersionSource: Send + Sync {
    /// Latest published version of `package`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::RegistryLookup` when the registry cannot
    /// answer. Callers treat this as recoverable.
    fn latest_version(&self, package: &str) -> ExpressoResult<String>;
}

/// Port for user-facing progress messages.
///
/// Keeps console output out of the orchestrator so it stays testable.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter {
    /// The project root was already present; nothing was written.
    fn root_exists(&self, root: &Path) -> ExpressoResult<()>;

    /// The project was created (or, under the legacy policy, is reported as such).
    fn created(&self, project_name: &str) -> ExpressoResult<()>;

    /// Follow-up commands for the user.
    fn next_steps(&self, project_name: &str) -> ExpressoResult<()>;
}
