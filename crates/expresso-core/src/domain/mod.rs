// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Expresso.
//!
//! This module contains pure scaffolding logic with no I/O. Filesystem,
//! registry, and console concerns are handled via ports (traits) defined in
//! the application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: configuration is built once and never mutated
//!
// Public API - what the world sees
pub mod capabilities;
pub mod composition;
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use composition::{
    AuxFileComposer, DirectoryPlanner, EntryPointComposer, ManifestComposer, ResolveVersion,
    compose_structure,
};
pub use entities::{
    common::RelativePath,
    configuration::{
        DEFAULT_APP_NAME, DEFAULT_PORT, ProjectConfiguration, ProjectConfigurationBuilder,
    },
    manifest::{DependencySet, Manifest, Scripts},
    project_structure::{DirectoryPlan, FileArtifact, FsEntry, ProjectStructure},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{ApiStyle, Language};
