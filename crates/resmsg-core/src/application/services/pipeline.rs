//! Interceptor Pipeline - ordered cross-cutting steps around formatting.
//!
//! Before-hooks run in registration order, each receiving the previous
//! hook's output; after-hooks fold the same way. A hook that returns an
//! error, or panics, is skipped: the message it was handed goes on to the
//! next hook unchanged.
//!
//! The list is snapshotted under the read lock and the lock is released
//! before any hook runs, so `register`/`clear` never wait on formatting.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use tracing::{trace, warn};

use crate::{
    application::{ApplicationError, ports::Interceptor},
    domain::Message,
    error::ResmsgResult,
};

#[derive(Clone, Copy)]
enum Phase {
    Before,
    After,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

/// Thread-safe, ordered interceptor list.
#[derive(Default)]
pub struct InterceptorPipeline {
    interceptors: RwLock<Vec<Arc<dyn Interceptor>>>,
}

impl InterceptorPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor.
    pub fn register(&self, interceptor: Arc<dyn Interceptor>) -> ResmsgResult<()> {
        let mut list = self
            .interceptors
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        list.push(interceptor);
        Ok(())
    }

    /// Remove every interceptor.
    pub fn clear(&self) -> ResmsgResult<()> {
        let mut list = self
            .interceptors
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        list.clear();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|i| i.name().to_string())
            .collect()
    }

    /// Fold every `on_before_format` over `message`.
    pub fn run_before(&self, message: &Message) -> Message {
        self.fold(Phase::Before, message)
    }

    /// Fold every `on_after_format` over `message`.
    pub fn run_after(&self, message: &Message) -> Message {
        self.fold(Phase::After, message)
    }

    fn snapshot(&self) -> Vec<Arc<dyn Interceptor>> {
        // A poisoned list is still a consistent Vec: writers only push/clear.
        match self.interceptors.read() {
            Ok(list) => list.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn fold(&self, phase: Phase, message: &Message) -> Message {
        let mut current = message.clone();
        for interceptor in self.snapshot() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| match phase {
                Phase::Before => interceptor.on_before_format(&current),
                Phase::After => interceptor.on_after_format(&current),
            }));

            match outcome {
                Ok(Ok(next)) => {
                    trace!(interceptor = interceptor.name(), phase = phase.as_str(), "applied");
                    current = next;
                }
                Ok(Err(e)) => warn!(
                    interceptor = interceptor.name(),
                    phase = phase.as_str(),
                    error = %e,
                    "interceptor failed; skipping"
                ),
                Err(_) => warn!(
                    interceptor = interceptor.name(),
                    phase = phase.as_str(),
                    "interceptor panicked; skipping"
                ),
            }
        }
        current
    }
}
