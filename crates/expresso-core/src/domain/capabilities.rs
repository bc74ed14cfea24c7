//! API style capability registry.
//!
//! Each [`ApiStyle`] is described exactly once by its [`ApiStyleDef`]: which
//! directories it lays out, which runtime packages it pulls in, and which
//! type-declaration packages a TypeScript project needs for it. The planners
//! and composers only ever ask this registry, so REST and GraphQL share one
//! engine instead of two drifting copies.
//!
//! # Adding a New Style
//!
//! 1. Add a variant to `ApiStyle` in `value_objects.rs`
//! 2. Add one [`ApiStyleDef`] entry to [`API_STYLE_REGISTRY`]
//! 3. Add its handler block to `composition::entry_point`

use crate::domain::value_objects::ApiStyle;

// ── Package names ────────────────────────────────────────────────────────────

pub const EXPRESS: &str = "express";
pub const CORS: &str = "cors";
pub const DOTENV: &str = "dotenv";
pub const GRAPHQL: &str = "graphql";
pub const APOLLO_SERVER_EXPRESS: &str = "apollo-server-express";

pub const NODEMON: &str = "nodemon";
pub const TYPESCRIPT: &str = "typescript";
pub const TYPES_NODE: &str = "@types/node";
pub const TYPES_EXPRESS: &str = "@types/express";
pub const TYPES_CORS: &str = "@types/cors";
pub const TYPES_GRAPHQL: &str = "@types/graphql";

// ── Style definitions ────────────────────────────────────────────────────────

/// Everything the engine needs to know about one API style.
#[derive(Debug, Clone, Copy)]
pub struct ApiStyleDef {
    /// The style this definition describes.
    pub style: ApiStyle,

    /// Directories relative to the project root, parents before children.
    pub directories: &'static [&'static str],

    /// Runtime packages added after the framework and optional middleware.
    pub runtime_packages: &'static [&'static str],

    /// Type declarations added to dev dependencies for TypeScript projects.
    pub typed_packages: &'static [&'static str],

    /// Path appended to the URL in the startup log line.
    pub listen_path: &'static str,
}

/// Single source of truth for API style capabilities.
pub static API_STYLE_REGISTRY: &[ApiStyleDef] = &[
    ApiStyleDef {
        style: ApiStyle::Rest,
        directories: &[
            "src",
            "src/routes",
            "src/controllers",
            "src/middlewares",
            "src/utils",
            "src/config",
        ],
        runtime_packages: &[],
        typed_packages: &[],
        listen_path: "",
    },
    ApiStyleDef {
        style: ApiStyle::GraphQl,
        // The routing layers give way to the GraphQL layer.
        directories: &[
            "src",
            "src/middlewares",
            "src/utils",
            "src/config",
            "src/graphql",
            "src/graphql/schemas",
            "src/graphql/resolvers",
        ],
        runtime_packages: &[GRAPHQL, APOLLO_SERVER_EXPRESS],
        typed_packages: &[TYPES_GRAPHQL],
        listen_path: "/graphql",
    },
];

/// Find the capability definition for an API style.
///
/// Every variant is registered; the `every_style_is_registered` test
/// guards that invariant.
pub fn api_style_def(style: ApiStyle) -> &'static ApiStyleDef {
    API_STYLE_REGISTRY
        .iter()
        .find(|def| def.style == style)
        .unwrap_or(&API_STYLE_REGISTRY[0])
}
