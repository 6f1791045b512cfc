//! Catalog-resident message templates.
//!
//! A [`MessageTemplate`] is what a store produces for one code. Every field is
//! optional because a customizing store may override only part of an entry
//! (e.g. just the title) and inherit the rest from an earlier store; see
//! [`MessageTemplate::overlay`].
//!
//! `None` means "not specified here". An explicit empty string is a real
//! value: it overrides the inherited text, which is how a later store clears
//! a field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::MessageType;

/// Mapping from code to template, as produced by one store or by a merge.
///
/// Ordered so listings and serialized catalogs are deterministic.
pub type TemplateMap = BTreeMap<String, MessageTemplate>;

/// The catalog definition of one code. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl MessageTemplate {
    pub fn new(message_type: MessageType, title: impl Into<String>) -> Self {
        Self {
            message_type: Some(message_type),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn http_status_code(mut self, code: u16) -> Self {
        self.http_status_code = Some(code);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Combine `self` (the base) with a later, customizing template.
    ///
    /// Every field set on `custom` wins; every field it leaves unset is
    /// inherited from `self`.
    pub fn overlay(&self, custom: &MessageTemplate) -> MessageTemplate {
        MessageTemplate {
            message_type: custom.message_type.or(self.message_type),
            title: custom.title.clone().or_else(|| self.title.clone()),
            description: custom
                .description
                .clone()
                .or_else(|| self.description.clone()),
            http_status_code: custom.http_status_code.or(self.http_status_code),
            hint: custom.hint.clone().or_else(|| self.hint.clone()),
        }
    }

    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &MessageTemplate::default()
    }
}
