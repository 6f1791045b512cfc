//! Built-in formatters.
//!
//! | Name | Output |
//! |------|--------|
//! | `json` | structured data, field for field |
//! | `xml` | markup, scalar fields as attributes |
//! | `text` | human-readable lines |
//! | `console` | `text` with an ANSI-colored header |

pub mod console;
pub mod json;
pub mod text;
pub mod xml;

use std::sync::Arc;

use resmsg_core::{
    application::{FormatterRegistry, InterceptorPipeline},
    domain::FormatterOptions,
    error::ResmsgResult,
};

pub use console::ConsoleFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use xml::XmlFormatter;

/// Names of the built-in formatters, sorted.
pub const BUILTIN_FORMATTERS: [&str; 4] = [
    ConsoleFormatter::NAME,
    JsonFormatter::NAME,
    TextFormatter::NAME,
    XmlFormatter::NAME,
];

/// Register every built-in formatter on `registry`.
pub fn register_builtin(registry: &FormatterRegistry) -> ResmsgResult<()> {
    registry.register(JsonFormatter::NAME, || Box::new(JsonFormatter))?;
    registry.register(XmlFormatter::NAME, || Box::new(XmlFormatter))?;
    registry.register(TextFormatter::NAME, || Box::new(TextFormatter))?;
    registry.register(ConsoleFormatter::NAME, || Box::new(ConsoleFormatter))?;
    Ok(())
}

/// A formatter registry with the built-ins registered.
pub fn default_formatter_registry(
    pipeline: Arc<InterceptorPipeline>,
    options: FormatterOptions,
) -> ResmsgResult<FormatterRegistry> {
    let registry = FormatterRegistry::new(pipeline, options);
    register_builtin(&registry)?;
    Ok(registry)
}
