pub mod common;
pub mod configuration;
pub mod manifest;
pub mod project_structure;

pub use crate::domain::DomainError;
pub use configuration::ProjectConfiguration;
pub use manifest::Manifest;
pub use project_structure::ProjectStructure;
