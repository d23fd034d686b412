//! JSON-file session store.
//!
//! The whole store is one pretty-printed JSON object mapping session id to
//! its turns. Every mutation rewrites the file synchronously while the store
//! lock is held, so the file always reflects the latest in-memory state.
//! The chat service runs mutations on the blocking pool.
//! A corrupt file is logged and treated as an empty store.

use super::store::SessionStore;
use super::types::{Role, Turn};
use crate::error::StoreError;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

type SessionMap = BTreeMap<String, Vec<Turn>>;

pub struct JsonFileSessionStore {
    path: PathBuf,
    sessions: Mutex<SessionMap>,
}

impl JsonFileSessionStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// Parent directories are created eagerly; the file itself is only
    /// written on the first mutation.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session store directory {}", parent.display())
            })?;
        }

        let sessions = load_sessions(path);
        tracing::debug!(
            path = %path.display(),
            sessions = sessions.len(),
            "session store loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            sessions: Mutex::new(sessions),
        })
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_sessions(&self) -> MutexGuard<'_, SessionMap> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocking write; async callers go through `spawn_blocking`.
    fn persist(&self, sessions: &SessionMap) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(sessions)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Push `new_turns` and write the file. On a failed write the session is
    /// restored to its previous length, so memory never runs ahead of disk.
    fn push_and_persist(&self, session_id: &str, new_turns: &[Turn]) -> Result<()> {
        let mut sessions = self.lock_sessions();
        let previous_len = sessions.get(session_id).map(Vec::len);
        sessions
            .entry(session_id.to_string())
            .or_default()
            .extend_from_slice(new_turns);

        if let Err(error) = self.persist(&sessions) {
            match previous_len {
                None => {
                    sessions.remove(session_id);
                }
                Some(len) => {
                    if let Some(turns) = sessions.get_mut(session_id) {
                        turns.truncate(len);
                    }
                }
            }
            return Err(error).with_context(|| {
                format!("Failed to persist session store to {}", self.path.display())
            });
        }

        Ok(())
    }
}

fn load_sessions(path: &Path) -> SessionMap {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return SessionMap::new(),
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "failed to read session store, starting empty"
            );
            return SessionMap::new();
        }
    };

    if contents.trim().is_empty() {
        return SessionMap::new();
    }

    match serde_json::from_str(&contents) {
        Ok(sessions) => sessions,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "session store is corrupt, starting empty"
            );
            SessionMap::new()
        }
    }
}

impl SessionStore for JsonFileSessionStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, session_id: &str) -> Vec<Turn> {
        self.lock_sessions()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    fn append(&self, session_id: &str, role: Role, text: &str) -> Result<Turn> {
        let turn = Turn::now(role, text);
        self.push_and_persist(session_id, std::slice::from_ref(&turn))?;
        Ok(turn)
    }

    fn append_exchange(
        &self,
        session_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<[Turn; 2]> {
        let pair = [
            Turn::now(Role::User, question),
            Turn::now(Role::Assistant, answer),
        ];
        self.push_and_persist(session_id, &pair)?;
        Ok(pair)
    }

    fn clear(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.lock_sessions();
        let Some(removed) = sessions.remove(session_id) else {
            return Ok(());
        };

        if let Err(error) = self.persist(&sessions) {
            sessions.insert(session_id.to_string(), removed);
            return Err(error).with_context(|| {
                format!("Failed to persist session store to {}", self.path.display())
            });
        }

        Ok(())
    }
}
