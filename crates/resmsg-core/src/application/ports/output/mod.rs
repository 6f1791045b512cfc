//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `resmsg-adapters` crate provides implementations.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::{FormatterOptions, Message, Severity, TemplateMap, to_object};
use crate::error::ResmsgResult;

/// Port for catalog sources.
///
/// Implemented by:
/// - `resmsg_adapters::template_store::EmbeddedStore` (bundled defaults)
/// - `resmsg_adapters::template_store::FileStore` (one JSON/TOML document)
/// - `resmsg_adapters::template_store::InMemoryStore` (pre-built mapping)
/// - `resmsg_adapters::template_store::SqliteStore` (database rows)
/// - `resmsg_adapters::template_store::CompositeStore` (ordered children)
///
/// ## Design Notes
///
/// - `load` is a one-shot, side-effect-free read producing a snapshot
/// - Stores never cache; the registry owns caching
/// - Synchronous; the registry bounds slow stores with a timeout
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Name used in merge reports and logs.
    fn name(&self) -> String;

    /// Read the whole catalog of this source.
    fn load(&self) -> ResmsgResult<TemplateMap>;

    /// Cheap pre-check; a store reporting `false` is skipped without loading.
    fn is_available(&self) -> bool {
        true
    }
}

/// Port for cross-cutting steps run around formatting.
///
/// Both hooks return a new message (or an error, in which case the pipeline
/// skips this interceptor and keeps the previous message).
pub trait Interceptor: Send + Sync {
    fn name(&self) -> &str;

    fn on_before_format(&self, message: &Message) -> ResmsgResult<Message> {
        Ok(message.clone())
    }

    fn on_after_format(&self, message: &Message) -> ResmsgResult<Message> {
        Ok(message.clone())
    }
}

/// Port for the concrete message → output conversion.
///
/// The interceptor pipeline is *not* part of this trait; callers obtain a
/// [`BoundFormatter`](crate::application::services::BoundFormatter) from
/// the formatter registry, which wraps the conversion with it.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    /// Render to text.
    fn render(&self, message: &Message, options: &FormatterOptions) -> ResmsgResult<String>;

    /// Render to a structured value.
    fn render_object(&self, message: &Message, options: &FormatterOptions) -> ResmsgResult<Value> {
        Ok(to_object(message, options))
    }
}

/// Port for the external logging sink.
pub trait LogSink: Send + Sync {
    /// `template` is a human-readable line; `fields` carry structured data.
    fn emit(&self, severity: Severity, template: &str, fields: &BTreeMap<String, Value>);
}

/// Port for ambient request context (path, method, user agent, caller id).
///
/// The core treats it as an opaque provider of key/value pairs.
pub trait ContextProvider: Send + Sync {
    fn fields(&self) -> BTreeMap<String, String>;

    fn get(&self, key: &str) -> Option<String> {
        self.fields().remove(key)
    }
}
