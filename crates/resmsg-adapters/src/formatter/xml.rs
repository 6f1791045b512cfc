//! Markup formatter.
//!
//! ```xml
//! <message success="false" code="VAL_002" type="warning" httpStatusCode="400">
//!   <title>Email is required</title>
//!   <description>Please provide Email.</description>
//!   <timestamp>2026-01-01T00:00:00.000Z</timestamp>
//!   <metadata>
//!     <entry key="request.path">/signup</entry>
//!   </metadata>
//! </message>
//! ```
//!
//! `data` and non-string metadata values are written as escaped JSON text.

use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use serde_json::Value;

use resmsg_core::{
    application::{ApplicationError, ports::Formatter},
    domain::{FormatterOptions, Message, format_timestamp},
    error::{ResmsgError, ResmsgResult},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormatter;

impl XmlFormatter {
    pub const NAME: &'static str = "xml";

    pub fn new() -> Self {
        Self
    }
}

fn failed(reason: impl std::fmt::Display) -> ResmsgError {
    ApplicationError::FormattingFailed {
        formatter: XmlFormatter::NAME.into(),
        reason: reason.to_string(),
    }
    .into()
}

/// Drops characters XML 1.0 cannot carry, even as references.
fn xml_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        })
        .collect()
}

/// Thin wrapper that maps writer failures into formatter errors.
struct Document {
    inner: Writer<Vec<u8>>,
}

impl Document {
    fn new(pretty: bool) -> Self {
        let inner = if pretty {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        } else {
            Writer::new(Vec::new())
        };
        Self { inner }
    }

    fn write(&mut self, event: Event<'_>) -> ResmsgResult<()> {
        self.inner.write_event(event).map_err(failed)
    }

    fn element(
        &mut self,
        name: &str,
        value: Option<&str>,
        include_null: bool,
    ) -> ResmsgResult<()> {
        match value {
            Some(v) => {
                let text = xml_chars(v);
                self.write(Event::Start(BytesStart::new(name)))?;
                self.write(Event::Text(BytesText::new(&text)))?;
                self.write(Event::End(BytesEnd::new(name)))
            }
            None if include_null => self.write(Event::Empty(BytesStart::new(name))),
            None => Ok(()),
        }
    }

    fn finish(self) -> ResmsgResult<String> {
        String::from_utf8(self.inner.into_inner()).map_err(failed)
    }
}

impl Formatter for XmlFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, message: &Message, options: &FormatterOptions) -> ResmsgResult<String> {
        let nulls = options.include_null_fields;
        let mut doc = Document::new(options.pretty);

        let success = message.is_success().to_string();
        let code = xml_chars(message.code());
        let status = message.http_status_code().to_string();
        doc.write(Event::Start(BytesStart::new("message").with_attributes([
            ("success", success.as_str()),
            ("code", code.as_str()),
            ("type", message.message_type().as_str()),
            ("httpStatusCode", status.as_str()),
        ])))?;

        doc.element("title", Some(message.title()), nulls)?;
        doc.element("description", Some(message.description()), nulls)?;
        doc.element("hint", message.hint(), nulls)?;
        let data = message.data().map(Value::to_string);
        doc.element("data", data.as_deref(), nulls)?;

        if options.include_timestamp {
            let ts = format_timestamp(&message.timestamp());
            doc.element("timestamp", Some(&ts), nulls)?;
        }
        if options.include_correlation_id {
            doc.element("correlationId", message.correlation_id(), nulls)?;
        }
        if options.include_metadata {
            if !message.metadata().is_empty() {
                doc.write(Event::Start(BytesStart::new("metadata")))?;
                for (key, value) in message.metadata() {
                    let text = match value {
                        Value::String(s) => xml_chars(s),
                        other => xml_chars(&other.to_string()),
                    };
                    let key = xml_chars(key);
                    doc.write(Event::Start(
                        BytesStart::new("entry").with_attributes([("key", key.as_str())]),
                    ))?;
                    doc.write(Event::Text(BytesText::new(&text)))?;
                    doc.write(Event::End(BytesEnd::new("entry")))?;
                }
                doc.write(Event::End(BytesEnd::new("metadata")))?;
            } else if nulls {
                doc.write(Event::Empty(BytesStart::new("metadata")))?;
            }
        }

        doc.write(Event::End(BytesEnd::new("message")))?;
        doc.finish()
    }
}
