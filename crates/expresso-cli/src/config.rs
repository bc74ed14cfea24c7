//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `EXPRESSO__<SECTION>__<KEY>`, e.g.
//!    `EXPRESSO__DEFAULTS__PORT=8080`
//! 3. Config file (`--config`, else `.expresso.toml` in the current
//!    directory, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use expresso_adapters::registry::{DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT};
use expresso_core::domain::{DEFAULT_APP_NAME, DEFAULT_PORT};

/// File name used for a project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = ".expresso.toml";

const ENV_PREFIX: &str = "EXPRESSO";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used when a question is skipped.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// npm registry settings.
    pub registry: RegistryConfig,
    /// Scaffold behaviour.
    pub scaffold: ScaffoldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub name: String,
    pub language: String,
    pub port: u16,
    pub cors: bool,
    pub env_file: bool,
    pub gitignore: bool,
    pub docker: bool,
    pub api_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub offline: bool,
    /// Resolve all packages concurrently.
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// `fail` or `skip`.
    pub on_existing: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.into(),
            language: "javascript".into(),
            port: DEFAULT_PORT,
            cors: true,
            env_file: true,
            gitignore: true,
            docker: false,
            api_style: "rest".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            offline: false,
            parallel: true,
        }
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            on_existing: "fail".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
            registry: RegistryConfig::default(),
            scaffold: ScaffoldConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let built = Self::builder(&path, required)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        built
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Parse TOML text layered over the defaults.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    fn builder(
        path: &Path,
        required: bool,
    ) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    /// Path to the active configuration file.
    ///
    /// A `.expresso.toml` in the current directory wins; otherwise the
    /// platform config dir from `directories::ProjectDirs`.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return local;
        }
        Self::global_config_path()
    }

    pub fn global_config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "expresso", "expresso")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prompt_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.name, "server");
        assert_eq!(cfg.defaults.language, "javascript");
        assert_eq!(cfg.defaults.port, 3000);
        assert!(cfg.defaults.cors && cfg.defaults.env_file && cfg.defaults.gitignore);
        assert!(!cfg.defaults.docker);
        assert_eq!(cfg.scaffold.on_existing, "fail");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml("[defaults]\nport = 8080\n").unwrap();
        assert_eq!(cfg.defaults.port, 8080);
        assert_eq!(cfg.defaults.api_style, "rest");
        assert_eq!(cfg.registry.url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[registry]\noffline = true\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(cfg.registry.offline);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/expresso.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn invalid_value_is_rejected() {
        assert!(AppConfig::from_toml("[defaults]\nport = \"many\"\n").is_err());
    }

    #[test]
    fn toml_round_trips_through_loader() {
        let text = AppConfig::default().to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), AppConfig::default());
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
