use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-session async locks.
///
/// Holding the guard serializes the read-history / call-provider /
/// append-turns sequence for one session id while other sessions proceed.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`. Released when the guard drops.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries nobody holds or waits on can go.
            locks.retain(|key, lock| key == session_id || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(session_id.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
