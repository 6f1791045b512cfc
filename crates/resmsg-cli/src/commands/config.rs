//! `resmsg config`: inspect the effective configuration.

use toml::Value;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            output.emit(&render(&value))?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                let json = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
                output.emit_json(&json)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.emit(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.emit(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn as_table(config: &AppConfig) -> CliResult<toml::Table> {
    match Value::try_from(config) {
        Ok(Value::Table(table)) => Ok(table),
        Ok(_) => Ok(toml::Table::new()),
        Err(e) => Err(CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}

/// Look up a dotted key such as `formatter.pretty` or `catalog.files`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let table = as_table(config)?;
    let mut current = Value::Table(table.clone());
    for part in key.split('.') {
        let next = match &current {
            Value::Table(t) => t.get(part).cloned(),
            _ => None,
        };
        current = next.ok_or_else(|| CliError::UnknownConfigKey {
            key: key.to_string(),
            available: leaf_keys(&table, ""),
        })?;
    }
    Ok(current)
}

fn leaf_keys(table: &toml::Table, prefix: &str) -> Vec<String> {
    table
        .iter()
        .flat_map(|(k, v)| {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            match v {
                Value::Table(inner) => leaf_keys(inner, &path),
                _ => vec![path],
            }
        })
        .collect()
}

/// Strings print bare; everything else in TOML syntax.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_keys() {
        let cfg = AppConfig::default();
        assert_eq!(render(&get_config_value(&cfg, "formatter.pretty").unwrap()), "false");
        assert_eq!(
            render(&get_config_value(&cfg, "registry.warning_status_code").unwrap()),
            "400"
        );
        assert_eq!(render(&get_config_value(&cfg, "output.no_color").unwrap()), "false");
    }

    #[test]
    fn get_section_returns_table() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "formatter").unwrap(),
            Value::Table(_)
        ));
    }

    #[test]
    fn get_unknown_key_lists_leaves() {
        let cfg = AppConfig::default();
        let err = get_config_value(&cfg, "does.not.exist").unwrap_err();
        let CliError::UnknownConfigKey { available, .. } = err else {
            panic!("expected UnknownConfigKey");
        };
        assert!(available.contains(&"formatter.use_colors".to_string()));
        assert!(available.contains(&"catalog.files".to_string()));
    }
}
