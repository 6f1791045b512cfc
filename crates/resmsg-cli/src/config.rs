//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the option structs it is
//! handed.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `RESMSG_<SECTION>__<KEY>`, e.g.
//!    `RESMSG_FORMATTER__PRETTY=true`
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use resmsg_core::domain::{FormatterOptions, RegistryOptions};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "RESMSG";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Custom catalogs layered over the bundled defaults.
    pub catalog: CatalogConfig,
    /// Global formatter options.
    pub formatter: FormatterOptions,
    /// Registry resolution settings.
    pub registry: RegistryOptions,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog files in merge order; later files win.
    pub files: Vec<PathBuf>,
    /// Optional database merged after the files.
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
    pub path: PathBuf,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    resmsg_adapters::template_store::DEFAULT_TABLE.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "loading configuration");

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("catalog.files"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.resmsg.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "resmsg", "resmsg")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".resmsg.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_have_no_custom_catalogs() {
        let cfg = AppConfig::default();
        assert!(cfg.catalog.files.is_empty());
        assert!(cfg.catalog.sqlite.is_none());
        assert_eq!(cfg.registry.warning_status_code, 400);
    }

    #[test]
    fn missing_optional_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.formatter, FormatterOptions::default());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&temp.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn file_overrides_selected_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[catalog]
files = ["a.json", "b.toml"]

[catalog.sqlite]
path = "messages.db"

[formatter]
pretty = true

[registry]
warning_status_code = 422
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.catalog.files, vec![PathBuf::from("a.json"), PathBuf::from("b.toml")]);
        assert_eq!(cfg.catalog.sqlite.as_ref().unwrap().table, "messages");
        assert!(cfg.formatter.pretty);
        assert!(cfg.formatter.include_timestamp);
        assert_eq!(cfg.registry.warning_status_code, 422);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
