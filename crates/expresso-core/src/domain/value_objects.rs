//! Domain value objects: Language, ApiStyle.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO capability logic. Which packages, directories, and imports a
//! choice implies lives in `capabilities.rs`. This file's only job is to
//! define the types, their string representations, and their `FromStr`
//! parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// The source flavour of the generated server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Plain ES modules, run directly by node.
    #[default]
    JavaScript,
    /// Compiled with `tsc` into `dist/`.
    TypeScript,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
        }
    }

    /// Label shown in prompts and summaries.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::JavaScript => "Javascript",
            Self::TypeScript => "Typescript",
        }
    }

    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::TypeScript => "ts",
        }
    }

    /// Whether the project needs a compile step before `node` can run it.
    pub const fn is_typed(&self) -> bool {
        matches!(self, Self::TypeScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            other => Err(DomainError::InvalidConfiguration(format!(
                "unknown language: {other}"
            ))),
        }
    }
}

// ── ApiStyle ─────────────────────────────────────────────────────────────────

/// How the generated server handles requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    /// A single fixed route handler on `/`.
    #[default]
    Rest,
    /// An Apollo server mounted on the Express app.
    GraphQl,
}

impl ApiStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::GraphQl => "graphql",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::GraphQl => "GraphQL",
        }
    }
}

impl fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "graphql" | "gql" => Ok(Self::GraphQl),
            other => Err(DomainError::InvalidConfiguration(format!(
                "unknown api style: {other}"
            ))),
        }
    }
}
