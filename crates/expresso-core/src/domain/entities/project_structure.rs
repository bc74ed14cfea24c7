use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Ordered directories to create under the project root.
///
/// Parents always precede their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPlan {
    directories: Vec<RelativePath>,
}

impl DirectoryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<RelativePath>) {
        self.directories.push(path.into());
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.directories.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelativePath> {
        self.directories.iter()
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

impl<'a> IntoIterator for &'a DirectoryPlan {
    type Item = &'a RelativePath;
    type IntoIter = std::slice::Iter<'a, RelativePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.directories.iter()
    }
}

/// A generated file: destination plus fully materialized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifact {
    pub path: RelativePath,
    pub content: String,
}

impl FileArtifact {
    pub fn new(path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Final project structure ready for materialization.
///
/// This is the output of composition. It contains no business logic, only
/// data, in the order it must be written: directories first, then files.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_directory(&mut self, path: impl Into<RelativePath>) {
        self.entries.push(FsEntry::Directory(path.into()));
    }

    pub fn add_file(&mut self, artifact: FileArtifact) {
        self.entries.push(FsEntry::File(artifact));
    }

    /// Check that the structure can be written in one forward pass.
    ///
    /// Rejects duplicate paths, paths outside the root, and files whose
    /// parent directory is created later or never.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyStructure);
        }

        let mut seen = HashSet::new();
        let mut created: HashSet<&RelativePath> = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if !path.is_contained() {
                return Err(DomainError::PathOutsideRoot {
                    path: path.to_string(),
                });
            }

            if !seen.insert(path.to_string()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }

            match entry {
                FsEntry::Directory(dir) => {
                    created.insert(dir);
                }
                FsEntry::File(file) => {
                    if let Some(parent) = file.path.parent() {
                        if !created.contains(&parent) {
                            return Err(DomainError::OrphanFile {
                                path: file.path.to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileArtifact> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Look up a generated file by its path relative to the root.
    pub fn file(&self, path: &str) -> Option<&FileArtifact> {
        self.files().find(|f| f.path.as_str() == path)
    }
}

#[cfg(test)]
impl ProjectStructure {
    pub(crate) fn with_directory(mut self, path: impl Into<RelativePath>) -> Self {
        self.add_directory(path);
        self
    }

    pub(crate) fn with_file(
        mut self,
        path: impl Into<RelativePath>,
        content: impl Into<String>,
    ) -> Self {
        self.add_file(FileArtifact::new(path, content));
        self
    }

    pub(crate) fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileArtifact),
    Directory(RelativePath),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => d,
        }
    }
}
