//! Built-in interceptors and the tracing log sink.
//!
//! Register them on an `InterceptorPipeline`; before-hooks run in
//! registration order, so register `CorrelationIdInterceptor` ahead of
//! anything that reads the id.

pub mod context;
pub mod correlation;
pub mod logging;

pub use context::{ContextEnrichmentInterceptor, StaticContext};
pub use correlation::CorrelationIdInterceptor;
pub use logging::{LoggingInterceptor, TracingSink};
