//! Message Registry - resolve codes to messages.
//!
//! The registry owns an ordered list of stores and a cached merge of their
//! catalogs. The cache is filled lazily on first use (or eagerly with
//! [`MessageRegistry::load`]) and swapped atomically: readers see either
//! the previous snapshot or the new one, never a partial merge.
//!
//! Stores are loaded outside the state lock, one merge at a time: a
//! separate merge gate makes concurrent cold readers wait for the first
//! merge and reuse its snapshot. A generation counter, bumped on every
//! [`configure`](MessageRegistry::configure), keeps a merge that raced
//! with a reconfigure from installing its stale result.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{
        DomainError, MergeReport, Message, MessageTemplate, Params, RegistryOptions, TemplateMap,
        merge_catalogs,
    },
    error::{ResmsgError, ResmsgResult},
};

#[derive(Default)]
struct RegistryState {
    stores: Vec<Arc<dyn TemplateStore>>,
    generation: u64,
    snapshot: Option<Arc<MergeReport>>,
}

/// Name of the helper threads that bound store loads.
const LOADER_THREAD: &str = "resmsg-store-load";

/// Thread-safe, lazily merged message catalog.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use resmsg_core::application::MessageRegistry;
/// use resmsg_core::domain::RegistryOptions;
///
/// let registry = MessageRegistry::new(RegistryOptions::default());
/// assert!(registry.get("NOT_A_CODE").is_err());
/// ```
pub struct MessageRegistry {
    defaults: Option<Arc<dyn TemplateStore>>,
    options: RegistryOptions,
    state: RwLock<RegistryState>,
    merge_gate: Mutex<()>,
}

impl MessageRegistry {
    /// A registry with no stores at all.
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            defaults: None,
            options,
            state: RwLock::new(RegistryState::default()),
            merge_gate: Mutex::new(()),
        }
    }

    /// A registry whose first (lowest-precedence) store is always `defaults`.
    pub fn with_defaults(defaults: Arc<dyn TemplateStore>, options: RegistryOptions) -> Self {
        Self {
            defaults: Some(defaults),
            ..Self::new(options)
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Replace the configured stores and drop the cached merge.
    ///
    /// Stores are listed lowest precedence first; the defaults store, if
    /// any, still sits below all of them.
    #[instrument(skip_all, fields(stores = stores.len()))]
    pub fn configure(&self, stores: Vec<Arc<dyn TemplateStore>>) -> ResmsgResult<()> {
        let mut state = self.write_state()?;
        state.stores = stores;
        state.generation += 1;
        state.snapshot = None;
        info!(generation = state.generation, "registry reconfigured");
        Ok(())
    }

    /// Drop the cached merge; the next resolution re-runs it.
    pub fn invalidate(&self) -> ResmsgResult<()> {
        self.write_state()?.snapshot = None;
        Ok(())
    }

    /// Merge eagerly if nothing is cached and return the active report.
    pub fn load(&self) -> ResmsgResult<Arc<MergeReport>> {
        if let Some(snapshot) = self.read_state()?.snapshot.clone() {
            debug!("catalog cache hit");
            return Ok(snapshot);
        }
        let _gate = self.lock_merge()?;
        // Another reader may have merged while we waited.
        if let Some(snapshot) = self.read_state()?.snapshot.clone() {
            debug!("catalog merged by a concurrent reader");
            return Ok(snapshot);
        }
        debug!("catalog cache miss");
        self.merge_now()
    }

    /// Re-run the merge against the current stores.
    ///
    /// The previous snapshot keeps serving readers until the new one is in.
    pub fn reload(&self) -> ResmsgResult<Arc<MergeReport>> {
        let _gate = self.lock_merge()?;
        self.merge_now()
    }

    /// The report of the most recent installed merge, if any.
    pub fn last_report(&self) -> ResmsgResult<Option<Arc<MergeReport>>> {
        Ok(self.read_state()?.snapshot.clone())
    }

    /// Resolve `code` into a fresh message.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyCode`] for an empty code
    /// - [`ApplicationError::MessageNotFound`] when no store defines it
    pub fn get(&self, code: &str) -> ResmsgResult<Message> {
        let template = self.template(code)?;
        Ok(Message::from_template(
            code,
            &template,
            self.options.warning_status_code,
        ))
    }

    /// [`get`](Self::get) followed by [`Message::with_params`].
    pub fn get_with(&self, code: &str, params: &Params) -> ResmsgResult<Message> {
        Ok(self.get(code)?.with_params(params))
    }

    /// The merged template for `code`.
    pub fn template(&self, code: &str) -> ResmsgResult<MessageTemplate> {
        if code.trim().is_empty() {
            return Err(DomainError::EmptyCode.into());
        }
        self.load()?
            .catalog
            .get(code)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::MessageNotFound {
                    code: code.to_string(),
                }
                .into()
            })
    }

    pub fn contains(&self, code: &str) -> ResmsgResult<bool> {
        Ok(self.load()?.catalog.contains_key(code))
    }

    /// Every merged code, sorted.
    pub fn codes(&self) -> ResmsgResult<Vec<String>> {
        Ok(self.load()?.catalog.keys().cloned().collect())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn read_state(&self) -> ResmsgResult<std::sync::RwLockReadGuard<'_, RegistryState>> {
        self.state
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write_state(&self) -> ResmsgResult<std::sync::RwLockWriteGuard<'_, RegistryState>> {
        self.state
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn lock_merge(&self) -> ResmsgResult<MutexGuard<'_, ()>> {
        self.merge_gate
            .lock()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    /// Callers hold the merge gate.
    #[instrument(skip_all)]
    fn merge_now(&self) -> ResmsgResult<Arc<MergeReport>> {
        let (generation, configured) = {
            let state = self.read_state()?;
            (state.generation, state.stores.clone())
        };

        let stores: Vec<Arc<dyn TemplateStore>> =
            self.defaults.iter().cloned().chain(configured).collect();

        let outcomes: Vec<(String, ResmsgResult<TemplateMap>)> = stores
            .iter()
            .map(|store| (store.name(), self.load_store(store)))
            .collect();

        let report = Arc::new(merge_catalogs(outcomes));
        if report.all_failed() {
            warn!(
                failures = report.failures.len(),
                "every store failed to load; catalog is empty"
            );
        }

        let mut state = self.write_state()?;
        if state.generation == generation {
            state.snapshot = Some(Arc::clone(&report));
            info!(codes = report.catalog.len(), "catalog merged");
        } else {
            debug!(
                started = generation,
                current = state.generation,
                "discarding merge from before a reconfigure"
            );
        }
        Ok(report)
    }

    fn load_store(&self, store: &Arc<dyn TemplateStore>) -> ResmsgResult<TemplateMap> {
        if !store.is_available() {
            return Err(unavailable(store.name(), "store reported itself unavailable"));
        }

        let Some(ms) = self.options.load_timeout_ms else {
            return store.load();
        };

        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(store);
        thread::Builder::new()
            .name(LOADER_THREAD.to_string())
            .spawn(move || {
                // The receiver may be gone after a timeout.
                let _ = tx.send(worker.load());
            })
            .map_err(|e| unavailable(store.name(), format!("could not spawn loader: {e}")))?;

        match rx.recv_timeout(Duration::from_millis(ms)) {
            Ok(outcome) => outcome,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(unavailable(
                store.name(),
                format!("load timed out after {ms}ms"),
            )),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(unavailable(store.name(), "loader thread panicked"))
            }
        }
    }
}

fn unavailable(store: String, reason: impl Into<String>) -> ResmsgError {
    ApplicationError::StoreUnavailable {
        store,
        reason: reason.into(),
    }
    .into()
}
