//! Use cases and the ports they drive.
//!
//! [`ScaffoldService`] decides the order of side effects; what gets written
//! is decided in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{Filesystem, Reporter, VersionSource};
pub use services::{
    ExistingRootPolicy, ScaffoldOutcome, ScaffoldReport, ScaffoldService, ScaffoldState,
    VersionResolver,
};
