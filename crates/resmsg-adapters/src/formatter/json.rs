//! Structured-data formatter.

use resmsg_core::{
    application::{ApplicationError, ports::Formatter},
    domain::{FormatterOptions, Message, to_object},
    error::ResmsgResult,
};

/// Serializes the message object as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub const NAME: &'static str = "json";

    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, message: &Message, options: &FormatterOptions) -> ResmsgResult<String> {
        let object = to_object(message, options);
        let text = if options.pretty {
            serde_json::to_string_pretty(&object)
        } else {
            serde_json::to_string(&object)
        };
        text.map_err(|e| {
            ApplicationError::FormattingFailed {
                formatter: Self::NAME.into(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
