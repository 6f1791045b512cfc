//! Application layer errors.
//!
//! These errors represent failures in loading, resolution and formatting
//! plumbing, not message logic. Message logic errors are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during catalog loading, resolution and formatting.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The code is absent from every configured store and the defaults.
    #[error("Message not found: {code}")]
    MessageNotFound { code: String },

    /// No formatter is registered under this name.
    #[error("Formatter not found: '{name}'")]
    FormatterNotFound { name: String, available: Vec<String> },

    /// A catalog document could not be parsed.
    #[error("Invalid message file '{source_name}': {reason}")]
    InvalidMessageFile { source_name: String, reason: String },

    /// A file or bundled resource backing a store is missing.
    #[error("Resource not found: {}", .path.display())]
    ResourceNotFound { path: PathBuf },

    /// A store could not be read; skipped during merges.
    #[error("Store '{store}' unavailable: {reason}")]
    StoreUnavailable { store: String, reason: String },

    /// Registry access failed (lock poisoned).
    #[error("Registry lock poisoned")]
    StoreLockError,

    /// The concrete conversion of a formatter failed.
    #[error("Formatter '{formatter}' failed: {reason}")]
    FormattingFailed { formatter: String, reason: String },

    /// An interceptor rejected a message; the pipeline skips it.
    #[error("Interceptor '{interceptor}' failed: {reason}")]
    InterceptorFailed { interceptor: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MessageNotFound { code } => vec![
                format!("No catalog defines '{}'", code),
                "Try: resmsg list to see available codes".into(),
                "Or add the code to a custom catalog file".into(),
            ],
            Self::FormatterNotFound { available, .. } => vec![
                format!("Registered formatters: {}", available.join(", ")),
                "Register a formatter before formatting with it".into(),
            ],
            Self::InvalidMessageFile { source_name, .. } => vec![
                format!("Fix the syntax in: {}", source_name),
                "Try: resmsg validate <FILE> for the exact error".into(),
            ],
            Self::ResourceNotFound { path } => vec![
                format!("Failed to access: {}", path.display()),
                "Check the catalog path in your configuration".into(),
            ],
            Self::StoreUnavailable { store, .. } => vec![
                format!("Store '{}' was skipped; defaults still apply", store),
                "Try again in a moment".into(),
            ],
            Self::StoreLockError => vec![
                "A registry lock was poisoned by a panicking thread".into(),
                "Recreate the registry".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MessageNotFound { .. }
            | Self::FormatterNotFound { .. }
            | Self::ResourceNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidMessageFile { .. } => ErrorCategory::Validation,
            Self::StoreUnavailable { .. } => ErrorCategory::Configuration,
            Self::StoreLockError
            | Self::FormattingFailed { .. }
            | Self::InterceptorFailed { .. } => ErrorCategory::Internal,
        }
    }
}
