//! Traits the application calls and the adapters implement.
//!
//! All three are driven ports: the core calls out through them and never
//! learns which adapter answered.

pub mod output;

pub use output::{Filesystem, Reporter, VersionSource};
