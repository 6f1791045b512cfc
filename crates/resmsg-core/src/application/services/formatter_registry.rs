//! Formatter Registry - named formatter factories.
//!
//! [`FormatterRegistry::get`] hands out a [`BoundFormatter`]: a fresh
//! formatter instance tied to the shared interceptor pipeline and the
//! registry's default options. Formatting through it runs
//!
//! 1. before-interceptors (fold)
//! 2. the concrete conversion on the resulting message
//! 3. after-interceptors (fold, on the pre-conversion message)
//!
//! and returns what step 2 produced. Conversion errors reach the caller
//! unchanged.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Formatter,
        services::pipeline::InterceptorPipeline,
    },
    domain::{FormatterOptions, Message},
    error::ResmsgResult,
};

/// Builds a new formatter instance per lookup.
pub type FormatterFactory = Arc<dyn Fn() -> Box<dyn Formatter> + Send + Sync>;

/// Thread-safe name → factory map with global formatter options.
pub struct FormatterRegistry {
    factories: RwLock<BTreeMap<String, FormatterFactory>>,
    options: RwLock<FormatterOptions>,
    pipeline: Arc<InterceptorPipeline>,
}

impl FormatterRegistry {
    pub fn new(pipeline: Arc<InterceptorPipeline>, options: FormatterOptions) -> Self {
        Self {
            factories: RwLock::new(BTreeMap::new()),
            options: RwLock::new(options),
            pipeline,
        }
    }

    /// Register (or replace) a formatter under `name`. Names are
    /// case-insensitive.
    pub fn register<F>(&self, name: &str, factory: F) -> ResmsgResult<()>
    where
        F: Fn() -> Box<dyn Formatter> + Send + Sync + 'static,
    {
        let key = normalize(name);
        let mut factories = self
            .factories
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        if factories.insert(key.clone(), Arc::new(factory)).is_some() {
            debug!(formatter = %key, "replaced formatter");
        }
        Ok(())
    }

    /// Look up a formatter.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::FormatterNotFound`] for an unregistered name.
    #[instrument(skip(self))]
    pub fn get(&self, name: &str) -> ResmsgResult<BoundFormatter> {
        let factory = {
            let factories = self
                .factories
                .read()
                .map_err(|_| ApplicationError::StoreLockError)?;
            match factories.get(&normalize(name)) {
                Some(f) => Arc::clone(f),
                None => {
                    return Err(ApplicationError::FormatterNotFound {
                        name: name.to_string(),
                        available: factories.keys().cloned().collect(),
                    }
                    .into());
                }
            }
        };

        Ok(BoundFormatter {
            inner: factory(),
            pipeline: Arc::clone(&self.pipeline),
            options: self.options()?,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories
            .read()
            .map(|f| f.contains_key(&normalize(name)))
            .unwrap_or(false)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> ResmsgResult<Vec<String>> {
        let factories = self
            .factories
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(factories.keys().cloned().collect())
    }

    /// Remove every formatter.
    pub fn clear(&self) -> ResmsgResult<()> {
        self.factories
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .clear();
        Ok(())
    }

    /// The global default options.
    pub fn options(&self) -> ResmsgResult<FormatterOptions> {
        Ok(self
            .options
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?
            .clone())
    }

    pub fn set_options(&self, options: FormatterOptions) -> ResmsgResult<()> {
        *self
            .options
            .write()
            .map_err(|_| ApplicationError::StoreLockError)? = options;
        Ok(())
    }

    pub fn pipeline(&self) -> &Arc<InterceptorPipeline> {
        &self.pipeline
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// A formatter wrapped with the interceptor pipeline.
pub struct BoundFormatter {
    inner: Box<dyn Formatter>,
    pipeline: Arc<InterceptorPipeline>,
    options: FormatterOptions,
}

impl BoundFormatter {
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// The options used when a call passes none.
    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    pub fn format(&self, message: &Message) -> ResmsgResult<String> {
        self.format_with(message, None)
    }

    pub fn format_as_object(&self, message: &Message) -> ResmsgResult<Value> {
        self.format_as_object_with(message, None)
    }

    /// Format with call-site options replacing the global ones.
    pub fn format_with(
        &self,
        message: &Message,
        options: Option<&FormatterOptions>,
    ) -> ResmsgResult<String> {
        let options = options.unwrap_or(&self.options);
        self.around(message, |m| self.inner.render(m, options))
    }

    pub fn format_as_object_with(
        &self,
        message: &Message,
        options: Option<&FormatterOptions>,
    ) -> ResmsgResult<Value> {
        let options = options.unwrap_or(&self.options);
        self.around(message, |m| self.inner.render_object(m, options))
    }

    fn around<T>(
        &self,
        message: &Message,
        convert: impl FnOnce(&Message) -> ResmsgResult<T>,
    ) -> ResmsgResult<T> {
        let prepared = self.pipeline.run_before(message);
        let output = convert(&prepared)?;
        // After-hooks observe the message; their result is not rendered.
        let _ = self.pipeline.run_after(&prepared);
        Ok(output)
    }
}

impl Message {
    /// Format through the formatter registered as `name`.
    pub fn to_format(&self, name: &str, formatters: &FormatterRegistry) -> ResmsgResult<String> {
        formatters.get(name)?.format(self)
    }
}
