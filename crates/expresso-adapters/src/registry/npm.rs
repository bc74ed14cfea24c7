//! npm registry adapter over blocking HTTP.

use std::time::Duration;

use expresso_core::{
    application::{ApplicationError, ports::VersionSource},
    error::{ExpressoError, ExpressoResult},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Queries `<registry>/<package>/latest` for the published version.
#[derive(Clone)]
pub struct NpmRegistry {
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

/// Why one registry request produced no version.
#[derive(Debug, Error)]
enum RegistryFailure {
    #[error("package not found")]
    NotFound,
    #[error("registry answered HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[source] ureq::Error),
    #[error("unexpected registry response: {0}")]
    Body(#[source] serde_json::Error),
}

impl From<ureq::Error> for RegistryFailure {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(404) => Self::NotFound,
            ureq::Error::StatusCode(code) => Self::Status(code),
            other => Self::Transport(other),
        }
    }
}

impl NpmRegistry {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// URL of the `latest` dist-tag document for `package`.
    ///
    /// Scoped names keep their `@` but encode the separator, so
    /// `@types/node` becomes `@types%2Fnode`.
    pub fn latest_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.base_url, package.replace('/', "%2F"))
    }

    fn fetch(&self, url: &str) -> Result<String, RegistryFailure> {
        let body = self.agent.get(url).call()?.into_body().read_to_string()?;
        Ok(body)
    }
}

impl std::fmt::Debug for NpmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NpmRegistry")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT)
    }
}

impl VersionSource for NpmRegistry {
    #[instrument(skip(self), level = "debug")]
    fn latest_version(&self, package: &str) -> ExpressoResult<String> {
        let url = self.latest_url(package);
        let version = self
            .fetch(&url)
            .and_then(|body| parse_version(&body))
            .map_err(|e| lookup_error(package, &e))?;
        debug!(%version, "Registry answered");
        Ok(version)
    }
}

fn parse_version(body: &str) -> Result<String, RegistryFailure> {
    serde_json::from_str::<LatestManifest>(body)
        .map(|m| m.version)
        .map_err(RegistryFailure::Body)
}

fn lookup_error(package: &str, failure: &RegistryFailure) -> ExpressoError {
    ApplicationError::RegistryLookup {
        package: package.to_string(),
        reason: failure.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_url_encodes_scoped_names() {
        let registry = NpmRegistry::new("https://registry.example.test/", DEFAULT_TIMEOUT);
        assert_eq!(
            registry.latest_url("express"),
            "https://registry.example.test/express/latest"
        );
        assert_eq!(
            registry.latest_url("@types/node"),
            "https://registry.example.test/@types%2Fnode/latest"
        );
    }

    #[test]
    fn parses_version_field() {
        let body = r#"{"name":"express","version":"4.21.2","main":"index.js"}"#;
        assert_eq!(parse_version(body).unwrap(), "4.21.2");
    }

    #[test]
    fn malformed_body_is_a_lookup_error() {
        let failure = parse_version("<html>").unwrap_err();
        assert!(matches!(failure, RegistryFailure::Body(_)));
        let err = lookup_error("express", &failure);
        assert!(matches!(
            err,
            ExpressoError::Application(ApplicationError::RegistryLookup { .. })
        ));
        assert!(err.to_string().contains("unexpected registry response"));
    }

    #[test]
    fn status_codes_are_classified() {
        assert!(matches!(
            RegistryFailure::from(ureq::Error::StatusCode(404)),
            RegistryFailure::NotFound
        ));
        assert!(matches!(
            RegistryFailure::from(ureq::Error::StatusCode(503)),
            RegistryFailure::Status(503)
        ));
        let err = lookup_error("nope", &RegistryFailure::NotFound);
        assert!(err.to_string().contains("package not found"));
    }

    #[test]
    fn unreachable_registry_fails_lookup() {
        // Port 9 (discard) on localhost is closed in test environments.
        let registry = NpmRegistry::new("http://127.0.0.1:9", Duration::from_millis(500));
        assert!(registry.latest_version("express").is_err());
    }
}
