//! Option structs shared by the registry and every formatter.
//!
//! Both are plain serde structs so the CLI (or any host) can load them from
//! its own configuration layer and hand them in.

use serde::{Deserialize, Serialize};

use crate::domain::entities::message::DEFAULT_WARNING_STATUS;

/// Output toggles applied by all formatters unless a call overrides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterOptions {
    pub include_timestamp: bool,
    pub include_correlation_id: bool,
    pub include_metadata: bool,
    /// Emit absent fields as explicit nulls instead of omitting them.
    pub include_null_fields: bool,
    /// Indented output for structured formats.
    pub pretty: bool,
    /// ANSI colors for the console formatter.
    pub use_colors: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            include_timestamp: true,
            include_correlation_id: true,
            include_metadata: true,
            include_null_fields: false,
            pretty: false,
            use_colors: true,
        }
    }
}

/// Resolution settings for the message registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Status code given to warnings whose template has none.
    pub warning_status_code: u16,
    /// Upper bound for one store's `load`; a store that overruns is skipped.
    pub load_timeout_ms: Option<u64>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            warning_status_code: DEFAULT_WARNING_STATUS,
            load_timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_keep_defaults() {
        let opts: FormatterOptions = serde_json::from_str(r#"{"pretty": true}"#).unwrap();
        assert!(opts.pretty);
        assert!(opts.include_timestamp);
        assert!(!opts.include_null_fields);
    }

    #[test]
    fn warning_default_is_400() {
        assert_eq!(RegistryOptions::default().warning_status_code, 400);
    }

    #[test]
    fn registry_options_from_partial_document() {
        let opts: RegistryOptions =
            serde_json::from_str(r#"{"load_timeout_ms": 250}"#).unwrap();
        assert_eq!(opts.load_timeout_ms, Some(250));
        assert_eq!(opts.warning_status_code, 400);
    }
}
