//! Command handlers and the wiring they share.
//!
//! Every handler builds its registries from [`AppConfig`] the same way: the
//! bundled catalog as defaults, then `catalog.files` in order, then the
//! optional SQLite table.

use std::sync::Arc;

use tracing::{debug, instrument};

use resmsg_adapters::{
    CorrelationIdInterceptor, EmbeddedStore, FileStore, LoggingInterceptor, SqliteStore,
    SqliteStoreConfig, TracingSink, default_formatter_registry,
};
use resmsg_core::prelude::*;

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub mod completions;
pub mod config;
pub mod list;
pub mod show;
pub mod validate;

/// Custom stores in merge order, as configured.
pub fn configured_stores(config: &AppConfig) -> CliResult<Vec<Arc<dyn TemplateStore>>> {
    let mut stores: Vec<Arc<dyn TemplateStore>> = config
        .catalog
        .files
        .iter()
        .map(|path| Arc::new(FileStore::new(path)) as Arc<dyn TemplateStore>)
        .collect();

    if let Some(sqlite) = &config.catalog.sqlite {
        let store = SqliteStore::new(SqliteStoreConfig {
            table: sqlite.table.clone(),
            ..SqliteStoreConfig::new(&sqlite.path)
        })?;
        stores.push(Arc::new(store));
    }

    Ok(stores)
}

/// Registry over the bundled catalog plus everything configured.
#[instrument(skip_all)]
pub fn build_registry(config: &AppConfig) -> CliResult<MessageRegistry> {
    let registry =
        MessageRegistry::with_defaults(Arc::new(EmbeddedStore::new()), config.registry.clone());
    let stores = configured_stores(config)?;
    debug!(stores = stores.len(), "configuring registry");
    registry.configure(stores)?;
    Ok(registry)
}

/// Merge eagerly and surface skipped stores as warnings.
pub fn load_and_report(registry: &MessageRegistry, output: &OutputManager) -> CliResult<()> {
    let report = registry.load()?;
    for failure in &report.failures {
        output.warning(&format!("Skipped catalog {failure}"))?;
    }
    Ok(())
}

/// Built-in formatters with the correlation and logging interceptors.
///
/// Colors follow the terminal: config and `--no-color` can only turn them
/// off.
pub fn build_formatters(
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<FormatterRegistry> {
    let mut options = config.formatter.clone();
    options.use_colors = options.use_colors && output.supports_color();

    let pipeline = Arc::new(InterceptorPipeline::new());
    pipeline.register(Arc::new(CorrelationIdInterceptor::new()))?;
    pipeline.register(Arc::new(LoggingInterceptor::new(Arc::new(TracingSink::new()))))?;

    Ok(default_formatter_registry(pipeline, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SqliteConfig;
    use std::path::PathBuf;

    #[test]
    fn no_configuration_means_no_custom_stores() {
        assert!(configured_stores(&AppConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn files_then_sqlite_in_order() {
        let mut config = AppConfig::default();
        config.catalog.files = vec![PathBuf::from("a.json"), PathBuf::from("b.toml")];
        config.catalog.sqlite = Some(SqliteConfig {
            path: PathBuf::from("m.db"),
            table: "messages".into(),
        });

        let names: Vec<String> = configured_stores(&config)
            .unwrap()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names[0].ends_with("a.json"));
        assert!(names[1].ends_with("b.toml"));
        assert!(names[2].starts_with("sqlite:"));
    }

    #[test]
    fn bad_table_name_is_configuration_error() {
        let mut config = AppConfig::default();
        config.catalog.sqlite = Some(SqliteConfig {
            path: PathBuf::from("m.db"),
            table: "x; DROP".into(),
        });
        let err = configured_stores(&config).err().expect("expected configuration error");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn registry_resolves_bundled_codes() {
        let registry = build_registry(&AppConfig::default()).unwrap();
        assert!(registry.contains("CRUD_001").unwrap());
    }
}
