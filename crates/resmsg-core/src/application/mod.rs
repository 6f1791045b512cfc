//! Application layer for resmsg.
//!
//! This layer contains:
//! - **Services**: MessageRegistry, InterceptorPipeline, FormatterRegistry
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer owns the shared, synchronized state (merged catalog
//! snapshot, interceptor list, formatter table). All message rules live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{BoundFormatter, FormatterRegistry, InterceptorPipeline, MessageRegistry};

// Re-export port traits (for adapter implementation)
pub use ports::{ContextProvider, Formatter, Interceptor, LogSink, TemplateStore};

pub use error::ApplicationError;
