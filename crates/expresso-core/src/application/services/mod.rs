//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project".

pub mod scaffold_service;
pub mod version_resolver;

pub use scaffold_service::{
    ExistingRootPolicy, ScaffoldOutcome, ScaffoldReport, ScaffoldService, ScaffoldState,
};
pub use version_resolver::VersionResolver;
