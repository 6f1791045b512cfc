//! Request-context enrichment and a simple context provider.

use std::collections::BTreeMap;
use std::sync::Arc;

use resmsg_core::{
    application::ports::{ContextProvider, Interceptor},
    domain::Message,
    error::ResmsgResult,
};

/// Provider keys copied into metadata.
pub const REQUEST_FIELDS: [&str; 4] = ["path", "method", "user_agent", "caller_id"];

/// Metadata prefix for enriched request fields.
pub const REQUEST_PREFIX: &str = "request.";

/// A fixed set of context fields.
///
/// Hosts without a request scope (the CLI, tests, batch jobs) use this to
/// hand ambient values to the interceptors.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    fields: BTreeMap<String, String>,
}

impl StaticContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl ContextProvider for StaticContext {
    fn fields(&self) -> BTreeMap<String, String> {
        self.fields.clone()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }
}

/// Copies request fields into `metadata["request.<field>"]` before
/// formatting. Keys the caller already set are left alone.
pub struct ContextEnrichmentInterceptor {
    provider: Arc<dyn ContextProvider>,
    enabled: bool,
}

impl ContextEnrichmentInterceptor {
    pub const NAME: &'static str = "context-enrichment";

    pub fn new(provider: Arc<dyn ContextProvider>) -> Self {
        Self {
            provider,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Interceptor for ContextEnrichmentInterceptor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_before_format(&self, message: &Message) -> ResmsgResult<Message> {
        if !self.enabled {
            return Ok(message.clone());
        }

        let fields = self.provider.fields();
        let mut enriched = message.clone();
        for field in REQUEST_FIELDS {
            let key = format!("{REQUEST_PREFIX}{field}");
            if enriched.metadata().contains_key(&key) {
                continue;
            }
            if let Some(value) = fields.get(field) {
                enriched = enriched.with_metadata(key, value.as_str());
            }
        }
        Ok(enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resmsg_core::domain::MessageType;
    use serde_json::json;

    fn provider() -> Arc<dyn ContextProvider> {
        Arc::new(
            StaticContext::new()
                .with("path", "/signup")
                .with("method", "POST")
                .with("caller_id", "svc-a")
                .with("secret", "do-not-copy"),
        )
    }

    #[test]
    fn copies_known_request_fields() {
        let out = ContextEnrichmentInterceptor::new(provider())
            .on_before_format(&Message::new("A", MessageType::Info, "a"))
            .unwrap();
        assert_eq!(out.metadata()["request.path"], json!("/signup"));
        assert_eq!(out.metadata()["request.method"], json!("POST"));
        assert_eq!(out.metadata()["request.caller_id"], json!("svc-a"));
        assert!(!out.metadata().contains_key("request.user_agent"));
        assert!(!out.metadata().contains_key("request.secret"));
    }

    #[test]
    fn caller_set_keys_win() {
        let msg = Message::new("A", MessageType::Info, "a").with_metadata("request.path", "/mine");
        let out = ContextEnrichmentInterceptor::new(provider())
            .on_before_format(&msg)
            .unwrap();
        assert_eq!(out.metadata()["request.path"], json!("/mine"));
    }

    #[test]
    fn disabled_is_a_no_op() {
        let msg = Message::new("A", MessageType::Info, "a");
        let out = ContextEnrichmentInterceptor::new(provider())
            .enabled(false)
            .on_before_format(&msg)
            .unwrap();
        assert!(out.metadata().is_empty());
    }

    #[test]
    fn enrichment_is_idempotent() {
        let interceptor = ContextEnrichmentInterceptor::new(provider());
        let once = interceptor
            .on_before_format(&Message::new("A", MessageType::Info, "a"))
            .unwrap();
        let twice = interceptor.on_before_format(&once).unwrap();
        assert!(once.same_content(&twice));
    }
}
