//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use strand_query::Translator;
use strand_store::{InMemoryStringStore, StringStore};

use crate::error::ServerResult;

/// Shared application state.
///
/// Cloning is cheap; every clone points at the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StringStore>,
    pub translator: Arc<Translator>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn StringStore>, translator: Translator) -> Self {
        Self {
            store,
            translator: Arc::new(translator),
            start_time: Instant::now(),
        }
    }

    /// A fresh, empty in-memory store with the standard query rules.
    pub fn in_memory() -> ServerResult<Self> {
        Ok(Self::new(
            Arc::new(InMemoryStringStore::new()),
            Translator::with_default_rules()?,
        ))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("translator", &self.translator)
            .field("uptime", &self.start_time.elapsed())
            .finish_non_exhaustive()
    }
}
