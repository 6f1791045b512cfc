//! resmsg Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for resmsg, a
//! catalog of short, structured result messages ("User Created",
//! "Login Failed") that resolves codes and renders them in many formats.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           resmsg-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (MessageRegistry, FormatterRegistry,   │
//! │   InterceptorPipeline)                  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (TemplateStore, Formatter, Interceptor, │
//! │  LogSink, ContextProvider)              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     resmsg-adapters (Infrastructure)    │
//! │  (FileStore, SqliteStore, JsonFormatter │
//! │   CorrelationIdInterceptor, ...)        │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Message, MessageTemplate, Params,     │
//! │   merge engine)                         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use resmsg_core::prelude::*;
//!
//! # fn run(defaults: Arc<dyn TemplateStore>, formatters: FormatterRegistry) -> ResmsgResult<()> {
//! // 1. Resolve a code against the merged catalog
//! let registry = MessageRegistry::with_defaults(defaults, RegistryOptions::default());
//! let message = registry
//!     .get("VAL_002")?
//!     .with_params(&Params::new().with("field", "Email"));
//!
//! // 2. Render it through a registered formatter
//! let json = message.to_format("json", &formatters)?;
//! println!("{json}");
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BoundFormatter, FormatterRegistry, InterceptorPipeline, MessageRegistry,
        ports::{ContextProvider, Formatter, Interceptor, LogSink, TemplateStore},
    };
    pub use crate::domain::{
        FormatterOptions, MergeReport, Message, MessageOutput, MessageTemplate, MessageType,
        Params, RegistryOptions, Severity, TemplateMap,
    };
    pub use crate::error::{ResmsgError, ResmsgResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
