// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for resmsg.
//!
//! This module contains pure message logic: no I/O, no locks, no globals.
//! Loading, caching and formatting plumbing live in the application layer
//! and in `resmsg-adapters`.
//!
//! - **Immutable values**: `Message` builders return modified copies
//! - **Deterministic merge**: later stores win, field by field
//! - **Typed parameters**: substitution input is a flat `Params` set
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod merge;
pub mod options;
pub mod output;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    DEFAULT_WARNING_STATUS, Message, MessageTemplate, Params, TemplateMap,
};

pub use error::{DomainError, ErrorCategory};
pub use merge::{MergeReport, StoreFailure, merge_catalogs, merge_into};
pub use options::{FormatterOptions, RegistryOptions};
pub use output::{MessageOutput, format_timestamp, to_object};
pub use value_objects::{MessageType, Severity};
