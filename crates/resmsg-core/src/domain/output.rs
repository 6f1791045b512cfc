//! The resolved-message output shape.
//!
//! [`MessageOutput`] is what an HTTP-facing adapter returns to clients and
//! what the structured formatters serialize. [`to_object`] applies
//! [`FormatterOptions`] toggles on top of it.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::entities::message::Message;
use crate::domain::options::FormatterOptions;

/// Serializable view of a [`Message`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOutput {
    pub success: bool,
    pub code: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub title: String,
    pub description: String,
    pub http_status_code: u16,
    pub hint: Option<String>,
    pub data: Option<Value>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Option<String>,
    pub metadata: BTreeMap<String, Value>,
}

impl From<&Message> for MessageOutput {
    fn from(message: &Message) -> Self {
        Self {
            success: message.is_success(),
            code: message.code().to_string(),
            message_type: message.message_type().as_str().to_string(),
            title: message.title().to_string(),
            description: message.description().to_string(),
            http_status_code: message.http_status_code(),
            hint: message.hint().map(str::to_string),
            data: message.data().cloned(),
            timestamp: message.timestamp(),
            correlation_id: message.correlation_id().map(str::to_string),
            metadata: message.metadata().clone(),
        }
    }
}

impl Message {
    /// The output shape, with every field present.
    pub fn to_output(&self) -> MessageOutput {
        MessageOutput::from(self)
    }
}

/// RFC 3339 timestamp with millisecond precision, as every formatter prints it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

/// Structured representation honoring the option toggles.
///
/// Starts from the full [`MessageOutput`] and removes disabled sections;
/// absent values are removed unless `include_null_fields` is set.
pub fn to_object(message: &Message, options: &FormatterOptions) -> Value {
    let output = message.to_output();
    let absent = |missing: bool| missing && !options.include_null_fields;

    let drop_hint = absent(output.hint.is_none());
    let drop_data = absent(output.data.is_none());
    let drop_correlation =
        !options.include_correlation_id || absent(output.correlation_id.is_none());
    let drop_metadata = !options.include_metadata || absent(output.metadata.is_empty());

    // Strings, numbers and JSON maps always serialize.
    let mut obj = match serde_json::to_value(output) {
        Ok(Value::Object(obj)) => obj,
        _ => Map::new(),
    };

    for (key, drop) in [
        ("hint", drop_hint),
        ("data", drop_data),
        ("timestamp", !options.include_timestamp),
        ("correlationId", drop_correlation),
        ("metadata", drop_metadata),
    ] {
        if drop {
            obj.remove(key);
        }
    }

    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageType;
    use serde_json::json;

    fn sample() -> Message {
        Message::new("AUTH_001", MessageType::Success, "Logged in")
            .with_correlation_id("abc")
            .with_metadata("region", "eu")
    }

    #[test]
    fn output_shape_has_lower_case_type_and_success_flag() {
        let out = serde_json::to_value(sample().to_output()).unwrap();
        assert_eq!(out["success"], json!(true));
        assert_eq!(out["type"], json!("success"));
        assert_eq!(out["correlationId"], json!("abc"));
        assert_eq!(out["metadata"]["region"], json!("eu"));
        assert!(out.get("timestamp").is_some());
    }

    #[test]
    fn to_object_matches_output_shape_when_everything_is_on() {
        let msg = sample().with_data(json!({"id": 1})).with_hint("retry");
        let opts = FormatterOptions {
            include_null_fields: true,
            ..FormatterOptions::default()
        };
        let obj = to_object(&msg, &opts);
        assert_eq!(obj, serde_json::to_value(msg.to_output()).unwrap());
        assert_eq!(obj["timestamp"], json!(format_timestamp(&msg.timestamp())));
    }

    #[test]
    fn to_object_respects_toggles() {
        let opts = FormatterOptions {
            include_timestamp: false,
            include_correlation_id: false,
            include_metadata: false,
            ..FormatterOptions::default()
        };
        let obj = to_object(&sample(), &opts);
        assert!(obj.get("timestamp").is_none());
        assert!(obj.get("correlationId").is_none());
        assert!(obj.get("metadata").is_none());
        assert_eq!(obj["code"], json!("AUTH_001"));
    }

    #[test]
    fn null_fields_only_when_asked() {
        let bare = Message::new("X", MessageType::Error, "Bad");
        let without = to_object(&bare, &FormatterOptions::default());
        assert!(without.get("data").is_none());
        assert!(without.get("hint").is_none());

        let with_nulls = to_object(
            &bare,
            &FormatterOptions {
                include_null_fields: true,
                ..FormatterOptions::default()
            },
        );
        assert_eq!(with_nulls["data"], Value::Null);
        assert_eq!(with_nulls["correlationId"], Value::Null);
        assert_eq!(with_nulls["metadata"], json!({}));
        assert_eq!(with_nulls["success"], json!(false));
    }
}
