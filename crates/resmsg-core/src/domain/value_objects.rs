//! Domain value objects: MessageType and Severity.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, their `FromStr` parsers and the fixed mappings between
//! them (type → default HTTP status, type → log severity).

use crate::domain::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ── MessageType ──────────────────────────────────────────────────────────────

/// The outcome class of a message.
///
/// Serialized lower-case (`"success"`, `"error"`, ...). Deserialization is
/// case-insensitive so hand-authored catalogs may write `"Error"` or `"ERROR"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Success,
    Info,
    Warning,
    Error,
    Critical,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        Self::Success,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// `true` for outcomes a caller should treat as successful.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::Info)
    }

    /// Status code used when a template does not carry one.
    ///
    /// `warning_status` is the caller-overridable default for warnings.
    pub const fn default_status_code(self, warning_status: u16) -> u16 {
        match self {
            Self::Success | Self::Info => 200,
            Self::Warning => warning_status,
            Self::Error | Self::Critical => 400,
        }
    }

    /// Log severity a message of this type is emitted at.
    pub const fn severity(self) -> Severity {
        match self {
            Self::Success | Self::Info => Severity::Info,
            Self::Warning => Severity::Warning,
            Self::Error => Severity::Error,
            Self::Critical => Severity::Critical,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "info" | "information" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            other => Err(DomainError::InvalidTemplate(format!(
                "unknown message type '{other}'; expected one of: success, info, warning, error, critical"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ── Severity ─────────────────────────────────────────────────────────────────

/// Severity handed to a log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
