use super::file::JsonFileSessionStore;
use super::store::{MemorySessionStore, SessionStore};
use crate::config::{Config, MemoryBackend};
use anyhow::Result;
use std::sync::Arc;

/// Build the session store selected by `[memory] backend`.
pub fn create_session_store(config: &Config) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.memory.backend {
        MemoryBackend::Memory => Arc::new(MemorySessionStore::new(config.memory.max_turns)),
        MemoryBackend::File => Arc::new(JsonFileSessionStore::open(&config.memory_path())?),
    };
    tracing::info!(backend = store.name(), "session store ready");
    Ok(store)
}
