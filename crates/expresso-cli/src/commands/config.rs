//! `expresso config`: read and write configuration values.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {}", display_value(&value)))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            set_config_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.format().is_machine_readable() {
                let json = serde_json::to_string_pretty(&config).map_err(|e| {
                    CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    }
                })?;
                output.print(&json)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised = config.to_toml().map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn as_json(config: &AppConfig) -> CliResult<Value> {
    serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Look up a dotted `section.key` path.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let root = as_json(config)?;
    let (section, field) = split_key(key)?;
    root.get(section)
        .and_then(|s| s.get(field))
        .cloned()
        .ok_or_else(|| CliError::UnknownConfigKey { key: key.into() })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn split_key(key: &str) -> CliResult<(&str, &str)> {
    match key.split_once('.') {
        Some((section, field)) if !section.is_empty() && !field.contains('.') => {
            Ok((section, field))
        }
        _ => Err(CliError::UnknownConfigKey { key: key.into() }),
    }
}

/// Parse `raw` with the same type the key has in the defaults.
fn typed_value(key: &str, template: &Value, raw: &str) -> CliResult<toml::Value> {
    let invalid = |expected: &str| CliError::InvalidInput {
        message: format!("'{key}' expects {expected}, got '{raw}'"),
        source: None,
    };
    match template {
        Value::Bool(_) => raw
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|_| invalid("true or false")),
        Value::Number(_) => raw
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .map(toml::Value::Integer)
            .ok_or_else(|| invalid("a non-negative integer")),
        _ => Ok(toml::Value::String(raw.to_string())),
    }
}

/// Update one key in the TOML file at `path`, creating the file if needed.
///
/// The result must still load as an [`AppConfig`]; otherwise nothing is
/// written.
#[instrument(skip_all, fields(path = %path.display(), key))]
fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let template = get_config_value(&AppConfig::default(), key)?;
    let (section, field) = split_key(key)?;
    let value = typed_value(key, &template, raw)?;

    let existing = if path.is_file() {
        std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?
    } else {
        String::new()
    };

    let mut doc: toml::Table = toml::from_str(&existing).map_err(|e| CliError::ConfigError {
        message: format!("'{}' is not valid TOML", path.display()),
        source: Some(Box::new(e)),
    })?;

    let table = doc
        .entry(section)
        .or_insert(toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(table) = table else {
        return Err(CliError::ConfigError {
            message: format!("'{section}' in '{}' is not a table", path.display()),
            source: None,
        });
    };
    let expected = match &value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    table.insert(field.to_string(), value);

    let text = toml::to_string_pretty(&doc).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    let loaded =
        AppConfig::from_toml(&text).with_cli_context(|| format!("Rejected value for '{key}'"))?;
    // Catches values that deserialize but do not fit, e.g. a port above 65535.
    if display_value(&get_config_value(&loaded, key)?) != expected {
        return Err(CliError::InvalidInput {
            message: format!("'{raw}' is out of range for '{key}'"),
            source: None,
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
    debug!("Configuration updated");
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "defaults.language").unwrap();
        assert_eq!(display_value(&value), "javascript");
        assert_eq!(
            display_value(&get_config_value(&cfg, "defaults.port").unwrap()),
            "3000"
        );
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        for key in ["does.not.exist", "defaults", "defaults.port.x", ".port"] {
            assert!(
                matches!(
                    get_config_value(&cfg, key),
                    Err(CliError::UnknownConfigKey { .. })
                ),
                "{key}"
            );
        }
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "output.no_color").unwrap();
        assert_eq!(display_value(&value), "false");
    }

    #[test]
    fn set_creates_file_and_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        set_config_value(&path, "defaults.port", "8080").unwrap();
        set_config_value(&path, "registry.offline", "true").unwrap();

        let cfg = AppConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.defaults.port, 8080);
        assert!(cfg.registry.offline);
        assert_eq!(cfg.defaults.language, "javascript");
    }

    #[test]
    fn set_rejects_wrong_type_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let err = set_config_value(&path, "defaults.cors", "maybe").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn set_rejects_out_of_range_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set_config_value(&path, "defaults.port", "70000").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn set_rejects_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(
            set_config_value(&path, "defaults.colour", "red"),
            Err(CliError::UnknownConfigKey { .. })
        ));
    }
}
