//! The message catalog that ships with resmsg.
//!
//! Compiled into the binary from `catalog/defaults.json` and always merged
//! first, so custom catalogs only need to carry what they change.
//!
//! | Prefix | Area |
//! |--------|------|
//! | `AUTH_` | authentication and authorization |
//! | `CRUD_` | create / update / delete / lookup |
//! | `VAL_`  | input validation |
//! | `SYS_`  | system conditions |

use resmsg_core::{domain::TemplateMap, error::ResmsgResult};

use crate::catalog_loader::{CatalogFormat, parse_catalog};

/// Source name used in merge reports.
pub const SOURCE_NAME: &str = "builtin:defaults.json";

/// The raw bundled document.
pub const DEFAULT_CATALOG: &str = include_str!("../catalog/defaults.json");

/// Parse the bundled catalog.
pub fn default_catalog() -> ResmsgResult<TemplateMap> {
    parse_catalog(SOURCE_NAME, DEFAULT_CATALOG, CatalogFormat::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resmsg_core::domain::MessageType;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = default_catalog().unwrap();
        for prefix in ["AUTH_", "CRUD_", "VAL_", "SYS_"] {
            assert!(
                catalog.keys().any(|code| code.starts_with(prefix)),
                "no {prefix} codes"
            );
        }
    }

    #[test]
    fn every_entry_has_type_and_title() {
        for (code, template) in default_catalog().unwrap() {
            assert!(template.message_type.is_some(), "{code} has no type");
            assert!(
                template.title.as_deref().is_some_and(|t| !t.is_empty()),
                "{code} has no title"
            );
        }
    }

    #[test]
    fn known_entries() {
        let catalog = default_catalog().unwrap();

        let val = &catalog["VAL_002"];
        assert_eq!(val.message_type, Some(MessageType::Warning));
        assert_eq!(val.title.as_deref(), Some("{field} is required"));
        assert_eq!(val.description.as_deref(), Some("Please provide {field}."));
        assert_eq!(val.http_status_code, None);

        let crud = &catalog["CRUD_001"];
        assert_eq!(crud.message_type, Some(MessageType::Success));
        assert_eq!(crud.title.as_deref(), Some("Created"));
        assert_eq!(crud.http_status_code, Some(200));
    }
}
