//! Correlation id stamping.

use std::sync::Arc;

use tracing::trace;
use uuid::Uuid;

use resmsg_core::{
    application::ports::{ContextProvider, Interceptor},
    domain::Message,
    error::ResmsgResult,
};

/// Context key read for an incoming correlation id.
pub const CORRELATION_KEY: &str = "correlation_id";

/// Gives every message a correlation id before formatting.
///
/// The id comes from the context provider when it has one, otherwise a
/// random UUID v4 is generated. A message that already carries an id is
/// passed through untouched.
#[derive(Default)]
pub struct CorrelationIdInterceptor {
    provider: Option<Arc<dyn ContextProvider>>,
}

impl CorrelationIdInterceptor {
    pub const NAME: &'static str = "correlation-id";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(provider: Arc<dyn ContextProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }
}

impl Interceptor for CorrelationIdInterceptor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_before_format(&self, message: &Message) -> ResmsgResult<Message> {
        if message.correlation_id().is_some() {
            return Ok(message.clone());
        }

        let id = self
            .provider
            .as_ref()
            .and_then(|p| p.get(CORRELATION_KEY))
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        trace!(code = message.code(), correlation_id = %id, "stamped correlation id");
        Ok(message.with_correlation_id(id))
    }
}
