//! Composite store: several stores presented as one.

use std::sync::Arc;

use tracing::instrument;

use resmsg_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{TemplateMap, merge_catalogs},
    error::ResmsgResult,
};

/// Ordered children merged with the usual precedence (later wins).
///
/// Children that fail are skipped with a warning; the composite only fails
/// when every child does.
pub struct CompositeStore {
    name: String,
    children: Vec<Arc<dyn TemplateStore>>,
}

impl CompositeStore {
    pub fn new(name: impl Into<String>, children: Vec<Arc<dyn TemplateStore>>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn children(&self) -> &[Arc<dyn TemplateStore>] {
        &self.children
    }
}

impl TemplateStore for CompositeStore {
    fn name(&self) -> String {
        self.name.clone()
    }

    #[instrument(skip(self), fields(store = %self.name, children = self.children.len()))]
    fn load(&self) -> ResmsgResult<TemplateMap> {
        let outcomes = self.children.iter().map(|child| {
            let outcome = if child.is_available() {
                child.load()
            } else {
                Err(ApplicationError::StoreUnavailable {
                    store: child.name(),
                    reason: "store reported itself unavailable".into(),
                }
                .into())
            };
            (child.name(), outcome)
        });

        let report = merge_catalogs(outcomes);
        if report.all_failed() {
            let reasons: Vec<String> = report.failures.iter().map(ToString::to_string).collect();
            return Err(ApplicationError::StoreUnavailable {
                store: self.name.clone(),
                reason: format!("every child failed ({})", reasons.join("; ")),
            }
            .into());
        }
        Ok(report.catalog)
    }

    fn is_available(&self) -> bool {
        self.children.is_empty() || self.children.iter().any(|c| c.is_available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_store::{FileStore, InMemoryStore};
    use resmsg_core::domain::{MessageTemplate, MessageType};
    use resmsg_core::error::ResmsgError;

    fn mem(name: &str, code: &str, template: MessageTemplate) -> Arc<dyn TemplateStore> {
        Arc::new(InMemoryStore::from_map(
            name,
            [(code.to_string(), template)].into_iter().collect(),
        ))
    }

    #[test]
    fn later_children_win_field_by_field() {
        let composite = CompositeStore::new(
            "layers",
            vec![
                mem(
                    "base",
                    "A",
                    MessageTemplate::new(MessageType::Error, "base").hint("base hint"),
                ),
                mem(
                    "custom",
                    "A",
                    MessageTemplate {
                        title: Some("custom".into()),
                        ..MessageTemplate::default()
                    },
                ),
            ],
        );

        let a = &composite.load().unwrap()["A"];
        assert_eq!(a.title.as_deref(), Some("custom"));
        assert_eq!(a.hint.as_deref(), Some("base hint"));
        assert_eq!(a.message_type, Some(MessageType::Error));
    }

    #[test]
    fn partial_failure_is_skipped() {
        let composite = CompositeStore::new(
            "layers",
            vec![
                Arc::new(FileStore::new("/absolutely/does/not/exist.json")),
                mem("ok", "B", MessageTemplate::new(MessageType::Info, "b")),
            ],
        );
        assert!(composite.is_available());
        assert!(composite.load().unwrap().contains_key("B"));
    }

    #[test]
    fn all_children_failing_is_store_unavailable() {
        let composite = CompositeStore::new(
            "layers",
            vec![
                Arc::new(FileStore::new("/absolutely/does/not/exist.json")),
                Arc::new(FileStore::new("/absolutely/does/not/exist.toml")),
            ],
        );
        assert!(!composite.is_available());
        assert!(matches!(
            composite.load(),
            Err(ResmsgError::Application(ApplicationError::StoreUnavailable { ref store, .. }))
                if store == "layers"
        ));
    }

    #[test]
    fn empty_composite_loads_nothing() {
        let composite = CompositeStore::new("empty", Vec::new());
        assert!(composite.load().unwrap().is_empty());
    }
}
