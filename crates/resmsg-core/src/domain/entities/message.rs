//! The runtime message value.
//!
//! A [`Message`] is built once per resolution from a merged
//! [`MessageTemplate`] and is never mutated afterwards. Every `with_*`
//! method borrows the message and returns a modified copy, so one resolved
//! message can be shared across threads and customized per call site.
//!
//! ```rust
//! use resmsg_core::domain::{Message, MessageType, Params};
//!
//! let base = Message::new("VAL_002", MessageType::Warning, "{field} is required");
//! let email = base.with_params(&Params::new().with("field", "Email"));
//!
//! assert_eq!(email.title(), "Email is required");
//! assert_eq!(base.title(), "{field} is required");
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::params::Params;
use super::template::MessageTemplate;
use crate::domain::error::DomainError;
use crate::domain::value_objects::MessageType;

/// Status code for warnings unless the registry is told otherwise.
pub const DEFAULT_WARNING_STATUS: u16 = 400;

/// Immutable resolved message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    code: String,
    message_type: MessageType,
    title: String,
    description: String,
    http_status_code: u16,
    hint: Option<String>,
    timestamp: DateTime<Utc>,
    correlation_id: Option<String>,
    data: Option<Value>,
    metadata: BTreeMap<String, Value>,
    parameters: BTreeMap<String, String>,
}

impl Message {
    /// Hand-built message, stamped now, status defaulted from the type.
    pub fn new(code: impl Into<String>, message_type: MessageType, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message_type,
            title: title.into(),
            description: String::new(),
            http_status_code: message_type.default_status_code(DEFAULT_WARNING_STATUS),
            hint: None,
            timestamp: Utc::now(),
            correlation_id: None,
            data: None,
            metadata: BTreeMap::new(),
            parameters: BTreeMap::new(),
        }
    }

    /// Build from a merged template.
    ///
    /// An unset type resolves to [`MessageType::Info`]; unset texts resolve
    /// to empty strings; an unset status falls back to the type default.
    pub fn from_template(
        code: impl Into<String>,
        template: &MessageTemplate,
        warning_status: u16,
    ) -> Self {
        let message_type = template.message_type.unwrap_or(MessageType::Info);
        Self {
            code: code.into(),
            message_type,
            title: template.title.clone().unwrap_or_default(),
            description: template.description.clone().unwrap_or_default(),
            http_status_code: template
                .http_status_code
                .unwrap_or_else(|| message_type.default_status_code(warning_status)),
            hint: template.hint.clone(),
            timestamp: Utc::now(),
            correlation_id: None,
            data: None,
            metadata: BTreeMap::new(),
            parameters: BTreeMap::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn http_status_code(&self) -> u16 {
        self.http_status_code
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Parameters captured by the last substitution.
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn is_success(&self) -> bool {
        self.message_type.is_success()
    }

    /// Field-for-field equality that ignores the resolution timestamp.
    pub fn same_content(&self, other: &Message) -> bool {
        Message {
            timestamp: other.timestamp,
            ..self.clone()
        } == *other
    }

    // ── Builders ──────────────────────────────────────────────────────────

    pub fn with_data(&self, data: impl Into<Value>) -> Self {
        Self {
            data: Some(data.into()),
            ..self.clone()
        }
    }

    /// Attach any serializable payload.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidPayload`] when `payload` cannot be represented
    /// as JSON (e.g. a map with non-string keys).
    pub fn with_payload<T: Serialize>(&self, payload: &T) -> Result<Self, DomainError> {
        let value = serde_json::to_value(payload).map_err(|e| DomainError::InvalidPayload {
            reason: e.to_string(),
        })?;
        Ok(self.with_data(value))
    }

    /// Copy with `key` set in the metadata, replacing any previous value.
    pub fn with_metadata(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut metadata = self.metadata.clone();
        metadata.insert(key.into(), value.into());
        Self {
            metadata,
            ..self.clone()
        }
    }

    pub fn with_correlation_id(&self, id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(id.into()),
            ..self.clone()
        }
    }

    pub fn with_status_code(&self, code: u16) -> Self {
        Self {
            http_status_code: code,
            ..self.clone()
        }
    }

    pub fn with_hint(&self, hint: impl Into<String>) -> Self {
        Self {
            hint: Some(hint.into()),
            ..self.clone()
        }
    }

    /// Substitute `{name}` placeholders in the title and description.
    ///
    /// The resolved parameters are recorded on the returned message.
    pub fn with_params(&self, params: &Params) -> Self {
        Self {
            title: params.substitute(&self.title),
            description: params.substitute(&self.description),
            parameters: params.resolved(),
            ..self.clone()
        }
    }

    /// [`with_params`](Self::with_params) from an untyped JSON object.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidParameterShape`] if `params` is not a flat object.
    pub fn with_json_params(&self, params: &Value) -> Result<Self, DomainError> {
        Ok(self.with_params(&Params::from_json(params)?))
    }

    /// Like [`with_params`](Self::with_params) but drops absent values first;
    /// returns an unchanged copy when nothing is left.
    pub fn with_params_if_provided(&self, params: Option<&Params>) -> Self {
        match params.map(Params::without_absent) {
            Some(present) if !present.is_empty() => self.with_params(&present),
            _ => self.clone(),
        }
    }
}
