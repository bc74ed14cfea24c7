//! Package version adapters.

mod fixed;
mod npm;

pub use fixed::StaticVersions;
pub use npm::{DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT, NpmRegistry};
