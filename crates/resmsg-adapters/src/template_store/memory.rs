//! In-memory store over a pre-built catalog.

use std::sync::{Arc, RwLock};

use resmsg_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{MessageTemplate, TemplateMap},
    error::ResmsgResult,
};

/// Thread-safe in-memory catalog.
///
/// Clones share the same catalog, so a host can keep a handle and edit
/// entries after handing the store to a registry; edits show up on the
/// registry's next merge.
#[derive(Clone)]
pub struct InMemoryStore {
    name: String,
    inner: Arc<RwLock<TemplateMap>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_map(name, TemplateMap::new())
    }

    /// Wrap an existing catalog.
    pub fn from_map(name: impl Into<String>, catalog: TemplateMap) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Add or replace one entry.
    pub fn insert(&self, code: impl Into<String>, template: MessageTemplate) -> ResmsgResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(code.into(), template);
        Ok(())
    }

    /// Remove one entry, returning it if it was present.
    pub fn remove(&self, code: &str) -> ResmsgResult<Option<MessageTemplate>> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.remove(code))
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all entries.
    pub fn clear(&self) -> ResmsgResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.clear();
        Ok(())
    }
}

impl TemplateStore for InMemoryStore {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> ResmsgResult<TemplateMap> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.clone())
    }
}
