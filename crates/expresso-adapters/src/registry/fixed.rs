//! Deterministic version source for tests and offline runs.

use std::collections::HashMap;

use expresso_core::{
    application::{ApplicationError, ports::VersionSource},
    error::ExpressoResult,
};

/// Answers from a fixed table, falling back to an optional default.
#[derive(Debug, Clone, Default)]
pub struct StaticVersions {
    versions: HashMap<String, String>,
    fallback: Option<String>,
}

impl StaticVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every package resolves to `latest`; used by `--offline`.
    pub fn offline() -> Self {
        Self::new().with_fallback("latest")
    }

    pub fn with(mut self, package: impl Into<String>, version: impl Into<String>) -> Self {
        self.versions.insert(package.into(), version.into());
        self
    }

    pub fn with_fallback(mut self, version: impl Into<String>) -> Self {
        self.fallback = Some(version.into());
        self
    }
}

impl VersionSource for StaticVersions {
    fn latest_version(&self, package: &str) -> ExpressoResult<String> {
        self.versions
            .get(package)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| {
                ApplicationError::RegistryLookup {
                    package: package.to_string(),
                    reason: "no version configured".into(),
                }
                .into()
            })
    }
}
