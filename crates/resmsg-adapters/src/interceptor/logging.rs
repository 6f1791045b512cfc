//! Message logging through a [`LogSink`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use resmsg_core::{
    application::ports::{Interceptor, LogSink},
    domain::{Message, Severity},
    error::ResmsgResult,
};

/// Emits every formatted message to a sink, at the severity of its type.
pub struct LoggingInterceptor {
    sink: Arc<dyn LogSink>,
}

impl LoggingInterceptor {
    pub const NAME: &'static str = "logging";

    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl Interceptor for LoggingInterceptor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_after_format(&self, message: &Message) -> ResmsgResult<Message> {
        let mut fields = BTreeMap::new();
        fields.insert("code".to_string(), Value::from(message.code()));
        fields.insert(
            "type".to_string(),
            Value::from(message.message_type().as_str()),
        );
        fields.insert(
            "httpStatusCode".to_string(),
            Value::from(message.http_status_code()),
        );
        if let Some(id) = message.correlation_id() {
            fields.insert("correlationId".to_string(), Value::from(id));
        }
        if !message.metadata().is_empty() {
            let metadata: Map<String, Value> = message
                .metadata()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            fields.insert("metadata".to_string(), Value::Object(metadata));
        }

        self.sink.emit(
            message.message_type().severity(),
            &format!("{}: {}", message.code(), message.title()),
            &fields,
        );
        Ok(message.clone())
    }
}

/// [`LogSink`] backed by `tracing` events under the `resmsg::message`
/// target.
///
/// `tracing` has no critical level: critical messages are emitted as
/// `error` with `critical = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, severity: Severity, template: &str, fields: &BTreeMap<String, Value>) {
        let fields = match serde_json::to_string(fields) {
            Ok(json) => json,
            Err(e) => {
                debug!(error = %e, "could not serialize log fields");
                String::from("{}")
            }
        };
        match severity {
            Severity::Info => info!(target: "resmsg::message", fields = %fields, "{template}"),
            Severity::Warning => warn!(target: "resmsg::message", fields = %fields, "{template}"),
            Severity::Error => error!(target: "resmsg::message", fields = %fields, "{template}"),
            Severity::Critical => {
                error!(target: "resmsg::message", critical = true, fields = %fields, "{template}")
            }
        }
    }
}
