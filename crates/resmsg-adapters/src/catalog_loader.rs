//! Catalog document parsing.
//!
//! Turns a catalog document (JSON, or TOML for `.toml` paths) into a
//! [`TemplateMap`]. Every store that reads documents goes through here so
//! they all report the same errors.
//!
//! # Document format
//!
//! ```json
//! {
//!   "AUTH_001": {
//!     "type": "Success",
//!     "title": "Login successful",
//!     "description": "Welcome back, {username}.",
//!     "httpStatusCode": 200,
//!     "hint": null
//!   }
//! }
//! ```
//!
//! The same shape as TOML:
//!
//! ```toml
//! [AUTH_001]
//! type = "success"
//! title = "Login successful"
//! description = "Welcome back, {username}."
//! httpStatusCode = 200
//! ```
//!
//! Every field is optional so that a customizing catalog can override only
//! what it cares about; `type` is case-insensitive.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use resmsg_core::{
    application::ApplicationError,
    domain::TemplateMap,
    error::ResmsgResult,
};

/// Syntax of a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// `.toml` (any case) is TOML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Parse one catalog document.
///
/// # Errors
///
/// [`ApplicationError::InvalidMessageFile`] when the text is not a valid
/// document or a code is blank.
pub fn parse_catalog(
    source_name: &str,
    text: &str,
    format: CatalogFormat,
) -> ResmsgResult<TemplateMap> {
    let invalid = |reason: String| ApplicationError::InvalidMessageFile {
        source_name: source_name.to_string(),
        reason,
    };

    let catalog: TemplateMap = match format {
        CatalogFormat::Json => serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?,
        CatalogFormat::Toml => toml::from_str(text).map_err(|e| invalid(e.to_string()))?,
    };

    if let Some(blank) = catalog.keys().find(|code| code.trim().is_empty()) {
        return Err(invalid(format!("blank message code {blank:?}")).into());
    }

    debug!(source = source_name, codes = catalog.len(), "parsed catalog");
    Ok(catalog)
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// - [`ApplicationError::ResourceNotFound`] if `path` does not exist
/// - [`ApplicationError::StoreUnavailable`] for other I/O failures
/// - [`ApplicationError::InvalidMessageFile`] for parse failures
#[instrument(fields(path = %path.display()))]
pub fn read_catalog_file(path: &Path) -> ResmsgResult<TemplateMap> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ApplicationError::ResourceNotFound {
            path: PathBuf::from(path),
        },
        _ => ApplicationError::StoreUnavailable {
            store: path.display().to_string(),
            reason: e.to_string(),
        },
    })?;

    parse_catalog(
        &path.display().to_string(),
        &text,
        CatalogFormat::from_path(path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use resmsg_core::domain::MessageType;
    use resmsg_core::error::ResmsgError;
    use std::fs;
    use tempfile::TempDir;

    const JSON_DOC: &str = r#"{
        "CRUD_001": {"type": "Success", "title": "Created", "httpStatusCode": 200},
        "VAL_002": {"type": "warning", "title": "{field} is required", "hint": null}
    }"#;

    const TOML_DOC: &str = r#"
[CRUD_001]
type = "success"
title = "Created"
httpStatusCode = 201

[SYS_002]
title = "Maintenance"
"#;

    #[test]
    fn format_follows_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.toml")), CatalogFormat::Toml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.TOML")), CatalogFormat::Toml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("messages")), CatalogFormat::Json);
    }

    #[test]
    fn parses_json_with_case_insensitive_type() {
        let catalog = parse_catalog("inline", JSON_DOC, CatalogFormat::Json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["CRUD_001"].http_status_code, Some(200));
        assert_eq!(catalog["VAL_002"].message_type, Some(MessageType::Warning));
        assert_eq!(catalog["VAL_002"].hint, None);
    }

    #[test]
    fn parses_toml_with_partial_entries() {
        let catalog = parse_catalog("inline.toml", TOML_DOC, CatalogFormat::Toml).unwrap();
        assert_eq!(catalog["CRUD_001"].http_status_code, Some(201));
        assert_eq!(catalog["SYS_002"].message_type, None);
        assert_eq!(catalog["SYS_002"].title.as_deref(), Some("Maintenance"));
    }

    #[test]
    fn malformed_document_is_invalid_message_file() {
        let err = parse_catalog("broken.json", "{ nope", CatalogFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            ResmsgError::Application(ApplicationError::InvalidMessageFile { ref source_name, .. })
                if source_name == "broken.json"
        ));
    }

    #[test]
    fn unknown_type_is_invalid_message_file() {
        let doc = r#"{"X": {"type": "Fatal"}}"#;
        assert!(matches!(
            parse_catalog("inline", doc, CatalogFormat::Json),
            Err(ResmsgError::Application(ApplicationError::InvalidMessageFile { .. }))
        ));
    }

    #[test]
    fn blank_code_is_rejected() {
        let doc = r#"{" ": {"title": "x"}}"#;
        assert!(parse_catalog("inline", doc, CatalogFormat::Json).is_err());
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let err = read_catalog_file(Path::new("/absolutely/does/not/exist.json")).unwrap_err();
        assert!(matches!(
            err,
            ResmsgError::Application(ApplicationError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn reads_toml_file_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("messages.toml");
        fs::write(&path, TOML_DOC).unwrap();

        let catalog = read_catalog_file(&path).unwrap();
        assert!(catalog.contains_key("SYS_002"));
    }
}
