//! Infrastructure adapters for resmsg.
//!
//! This crate implements the ports defined in `resmsg-core::application::ports`.
//! It contains all external dependencies and I/O operations.
//!
//! - [`template_store`]: embedded, file, in-memory, SQLite and composite stores
//! - [`formatter`]: json, xml, text and console formatters
//! - [`interceptor`]: correlation id, context enrichment and logging
//! - [`catalog_loader`]: catalog document parsing shared by the stores

pub mod builtin_messages;
pub mod catalog_loader;
pub mod formatter;
pub mod interceptor;
pub mod template_store;

// Re-export commonly used adapters
pub use formatter::{
    ConsoleFormatter, JsonFormatter, TextFormatter, XmlFormatter, default_formatter_registry,
    register_builtin,
};
pub use interceptor::{
    ContextEnrichmentInterceptor, CorrelationIdInterceptor, LoggingInterceptor, StaticContext,
    TracingSink,
};
pub use template_store::{
    CompositeStore, EmbeddedStore, FileStore, InMemoryStore, SqliteStore, SqliteStoreConfig,
};
