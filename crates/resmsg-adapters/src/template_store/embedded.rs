//! Bundled default catalog store.

use resmsg_core::{application::ports::TemplateStore, domain::TemplateMap, error::ResmsgResult};

use crate::builtin_messages;

/// Read-only store over the catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStore;

impl EmbeddedStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for EmbeddedStore {
    fn name(&self) -> String {
        builtin_messages::SOURCE_NAME.to_string()
    }

    fn load(&self) -> ResmsgResult<TemplateMap> {
        builtin_messages::default_catalog()
    }
}
