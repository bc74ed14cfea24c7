//! Scaffolding engine for Express.js backends.
//!
//! `expresso-core` turns a [`domain::ProjectConfiguration`] into a
//! [`domain::ProjectStructure`] and writes it through three ports:
//!
//! ```text
//!   ProjectConfiguration
//!          │
//!          ▼
//!   compose_structure ──► VersionSource   (npm registry, static table)
//!          │
//!          ▼
//!   ScaffoldService ────► Filesystem      (local disk, in-memory)
//!                   └───► Reporter        (console banners)
//! ```
//!
//! `domain` is pure and synchronous. `application` owns the ports and the
//! ordering of side effects. Adapters live in `expresso-adapters`.
//!
//! ```rust,ignore
//! use expresso_core::prelude::*;
//!
//! let config = ProjectConfiguration::builder("server")
//!     .language(Language::TypeScript)
//!     .api_style(ApiStyle::GraphQl)
//!     .build()?;
//!
//! ScaffoldService::new(filesystem, versions, reporter).scaffold(&config, ".")?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// The types an adapter or front-end needs.
pub mod prelude {
    pub use crate::application::{
        ExistingRootPolicy, ScaffoldOutcome, ScaffoldReport, ScaffoldService,
        ports::{Filesystem, Reporter, VersionSource},
    };
    pub use crate::domain::{
        ApiStyle, FileArtifact, FsEntry, Language, Manifest, ProjectConfiguration,
        ProjectConfigurationBuilder, ProjectStructure,
    };
    pub use crate::error::{ExpressoError, ExpressoResult};
}
