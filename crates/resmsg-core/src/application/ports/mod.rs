//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `resmsg-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateStore`: Catalog sources
//!   - `Interceptor`: Cross-cutting steps around formatting
//!   - `Formatter`: Message → text / structured value
//!   - `LogSink`: Severity-tagged log output
//!   - `ContextProvider`: Ambient request fields
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The services in `crate::application::services`)

pub mod output;

pub use output::{ContextProvider, Formatter, Interceptor, LogSink, TemplateStore};

#[cfg(test)]
pub use output::MockTemplateStore;
