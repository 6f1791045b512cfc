//! Substitution parameters.
//!
//! [`Params`] is the typed, flat key/value set handed to
//! [`Message::with_params`](super::message::Message::with_params). Values are
//! converted to text once, on insertion, through their `Display`
//! implementation; an absent value is kept as `None` and renders as the empty
//! string.
//!
//! # Placeholder rules
//!
//! - Syntax is `{name}`.
//! - Names match case-insensitively (`{Field}` matches `field`).
//! - A placeholder with no matching parameter is left untouched.
//! - There are no format specifiers; `{amount:C}` is just an unknown name.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde_json::Value;

use crate::domain::error::DomainError;

/// Ordered, flat substitution parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Option<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing an earlier one with the same name.
    pub fn with(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key.into(), Some(value.to_string()))
    }

    /// Add a parameter whose value may be absent.
    pub fn with_opt<V: fmt::Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert(key.into(), value.map(|v| v.to_string()))
    }

    /// Build from a JSON value.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidParameterShape`] unless `value` is an object whose
    /// members are all scalars (string, number, bool or null).
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        let object = value
            .as_object()
            .ok_or_else(|| DomainError::InvalidParameterShape {
                reason: format!("expected a flat object, got {}", json_kind(value)),
            })?;

        let mut params = Self::new();
        for (key, member) in object {
            let text = match member {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(DomainError::InvalidParameterShape {
                        reason: format!(
                            "parameter '{key}' is {}; nested values are not supported",
                            json_kind(member)
                        ),
                    });
                }
            };
            params = params.insert(key.clone(), text);
        }
        Ok(params)
    }

    fn insert(mut self, key: String, value: Option<String>) -> Self {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Copy without the parameters whose value is absent.
    pub fn without_absent(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, v)| v.is_some())
                .cloned()
                .collect(),
        }
    }

    /// Parameters as text, absent values rendered empty.
    pub fn resolved(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().unwrap_or_default()))
            .collect()
    }

    /// Replace every `{name}` placeholder in `text` that has a parameter.
    pub fn substitute(&self, text: &str) -> String {
        if self.entries.is_empty() || !text.contains('{') {
            return text.to_string();
        }

        // Later duplicates (differing only by case) win.
        let lookup: HashMap<String, &str> = self
            .entries
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.as_deref().unwrap_or("")))
            .collect();

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find(['{', '}']) {
                Some(close) if after[close..].starts_with('}') => {
                    let name = &after[..close];
                    match lookup.get(&name.to_lowercase()) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                // Unclosed, or another `{` first: keep the brace literally.
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Params::new(), |params, (k, v)| params.with(k, v))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
