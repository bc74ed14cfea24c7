//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use expresso_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ExpressoError, ExpressoResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ExpressoResult<()> {
        trace!(path = %path.display(), "mkdir -p");
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ExpressoResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ExpressoError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_carry_path_and_operation() {
        let err = map_io_error(
            Path::new("/nope/x"),
            io::Error::from(io::ErrorKind::PermissionDenied),
            "write file",
        );
        let ExpressoError::Application(ApplicationError::FilesystemError { path, reason }) = err
        else {
            panic!("unexpected error variant");
        };
        assert_eq!(path, Path::new("/nope/x"));
        assert!(reason.starts_with("Failed to write file"));
    }
}
