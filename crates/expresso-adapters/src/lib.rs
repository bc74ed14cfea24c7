//! Infrastructure adapters for Expresso.
//!
//! This crate implements the ports defined in `expresso-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod registry;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use registry::{NpmRegistry, StaticVersions};
