// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be stored in merge reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid message template: {0}")]
    InvalidTemplate(String),

    /// Substitution input was not a flat key/value structure.
    #[error("Invalid parameter shape: {reason}")]
    InvalidParameterShape { reason: String },

    /// A payload could not be represented as structured data.
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Message code must not be empty")]
    EmptyCode,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplate(msg) => vec![
                "Check the catalog entry".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidParameterShape { .. } => vec![
                "Parameters must be a flat object of name -> scalar value".into(),
                "Example: {\"field\": \"Email\", \"count\": 3}".into(),
            ],
            Self::InvalidPayload { .. } => vec![
                "Payloads must serialize to JSON (string map keys, finite numbers)".into(),
            ],
            Self::EmptyCode => vec!["Pass a code such as AUTH_001".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplate(_)
            | Self::InvalidParameterShape { .. }
            | Self::InvalidPayload { .. }
            | Self::EmptyCode => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
