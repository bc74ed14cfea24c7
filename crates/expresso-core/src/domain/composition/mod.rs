//! Scaffold composition: configuration in, [`ProjectStructure`] out.
//!
//! Every function here is pure. The only outside capability is version
//! lookup, reached through [`ResolveVersion`] so tests can pass a closure.

pub mod aux_files;
pub mod directory_planner;
pub mod entry_point;
pub mod manifest_composer;

use std::path::Path;

pub use aux_files::AuxFileComposer;
pub use directory_planner::DirectoryPlanner;
pub use entry_point::EntryPointComposer;
pub use manifest_composer::ManifestComposer;

use crate::domain::{
    entities::{configuration::ProjectConfiguration, project_structure::ProjectStructure},
    error::DomainError,
};

/// Turns a package name into a version string.
///
/// `None` means the lookup failed; the manifest records it as `null`.
pub trait ResolveVersion {
    fn resolve(&self, package: &str) -> Option<String>;
}

impl<F> ResolveVersion for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, package: &str) -> Option<String> {
        self(package)
    }
}

/// Compose the full project tree rooted at `root`.
///
/// Order: directories, `package.json`, entry point, auxiliary files. The
/// result is validated, so a file emitted twice is rejected here rather
/// than overwritten on disk.
pub fn compose_structure(
    config: &ProjectConfiguration,
    resolver: &dyn ResolveVersion,
    root: &Path,
) -> Result<ProjectStructure, DomainError> {
    config.validate()?;

    let mut structure = ProjectStructure::new(root);

    for dir in &DirectoryPlanner::plan(config) {
        structure.add_directory(dir.clone());
    }

    let manifest = ManifestComposer::compose(config, resolver);
    structure.add_file(ManifestComposer::artifact(&manifest)?);
    structure.add_file(EntryPointComposer::compose(config));

    for artifact in AuxFileComposer::compose(config) {
        structure.add_file(artifact);
    }

    structure.validate()?;
    Ok(structure)
}
