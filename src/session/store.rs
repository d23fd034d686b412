use super::types::{Role, Turn};
use anyhow::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default cap on turns kept per session by the in-memory backend.
pub const DEFAULT_MAX_TURNS: usize = 40;

pub trait SessionStore: Send + Sync {
    /// Backend identifier (e.g. "memory", "file").
    fn name(&self) -> &str;

    /// Turns of `session_id`, oldest first. Unknown sessions yield an empty list.
    fn get(&self, session_id: &str) -> Vec<Turn>;

    /// Append a turn stamped with the current time, creating the session if needed.
    fn append(&self, session_id: &str, role: Role, text: &str) -> Result<Turn>;

    /// Append a user question and the assistant answer as one unit: either
    /// both turns are stored or neither is.
    fn append_exchange(
        &self,
        session_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<[Turn; 2]>;

    /// Drop the session entirely. Absent sessions are a no-op.
    fn clear(&self, session_id: &str) -> Result<()>;
}

/// Volatile store: sessions live as long as the process and are capped at
/// `max_turns`, evicting the oldest turn first.
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, VecDeque<Turn>>>,
    max_turns: usize,
}

impl MemorySessionStore {
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_turns: max_turns.max(1),
        }
    }

    #[cfg(test)]
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<String, VecDeque<Turn>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push_capped(&self, session_id: &str, new_turns: &[Turn]) {
        let mut sessions = self.lock_sessions();
        let turns = sessions.entry(session_id.to_string()).or_default();
        turns.extend(new_turns.iter().cloned());
        while turns.len() > self.max_turns {
            turns.pop_front();
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl SessionStore for MemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, session_id: &str) -> Vec<Turn> {
        self.lock_sessions()
            .get(session_id)
            .map(|turns| turns.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn append(&self, session_id: &str, role: Role, text: &str) -> Result<Turn> {
        let turn = Turn::now(role, text);
        self.push_capped(session_id, std::slice::from_ref(&turn));
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
        self.push_capped(session_id, &pair);
        Ok(pair)
    }

    fn clear(&self, session_id: &str) -> Result<()> {
        self.lock_sessions().remove(session_id);
        Ok(())
    }
}
