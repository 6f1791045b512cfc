//! Plain-text formatter.
//!
//! ```text
//! [WARNING] VAL_002 (400): Email is required
//! Please provide Email.
//! Hint: Use a work address.
//! Correlation ID: 6f1c...
//! Timestamp: 2026-01-01T00:00:00.000Z
//! Metadata:
//!   request.path: /signup
//! ```

use serde_json::Value;

use resmsg_core::{
    application::ports::Formatter,
    domain::{FormatterOptions, Message, MessageType, format_timestamp},
    error::ResmsgResult,
};

/// Placeholder printed for absent fields when null fields are requested.
const ABSENT: &str = "-";

#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub const NAME: &'static str = "text";

    pub fn new() -> Self {
        Self
    }
}

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, message: &Message, options: &FormatterOptions) -> ResmsgResult<String> {
        Ok(render_lines(message, options, &|_, header| header.to_string()))
    }
}

/// Shared body of the text and console formatters; `paint` styles the
/// header line.
pub(crate) fn render_lines(
    message: &Message,
    options: &FormatterOptions,
    paint: &dyn Fn(MessageType, &str) -> String,
) -> String {
    let header = format!(
        "[{}] {} ({}): {}",
        message.message_type().as_str().to_ascii_uppercase(),
        message.code(),
        message.http_status_code(),
        message.title()
    );
    let mut lines = vec![paint(message.message_type(), &header)];

    if !message.description().is_empty() {
        lines.push(message.description().to_string());
    }

    let mut labeled = |label: &str, value: Option<String>| match value {
        Some(v) => lines.push(format!("{label}: {v}")),
        None if options.include_null_fields => lines.push(format!("{label}: {ABSENT}")),
        None => {}
    };

    labeled("Hint", message.hint().map(str::to_string));
    labeled("Data", message.data().map(Value::to_string));
    if options.include_correlation_id {
        labeled("Correlation ID", message.correlation_id().map(str::to_string));
    }
    if options.include_timestamp {
        labeled("Timestamp", Some(format_timestamp(&message.timestamp())));
    }

    if options.include_metadata && !message.metadata().is_empty() {
        lines.push("Metadata:".to_string());
        for (key, value) in message.metadata() {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(format!("  {key}: {text}"));
        }
    }

    lines.join("\n")
}
