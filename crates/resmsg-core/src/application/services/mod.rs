//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports: resolving a code
//! against the merged catalog, and running formatters inside the
//! interceptor pipeline. Each is an explicitly constructed object with its
//! own lock, so tests can build isolated instances side by side.

pub mod formatter_registry;
pub mod pipeline;
pub mod registry;

pub use formatter_registry::{BoundFormatter, FormatterFactory, FormatterRegistry};
pub use pipeline::InterceptorPipeline;
pub use registry::MessageRegistry;
