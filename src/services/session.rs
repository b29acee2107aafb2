//! In-memory conversation sessions with an explicit lifecycle.

use std::collections::HashMap;

use crate::models::SessionTurn;

/// Maps conversation identifiers to their recorded turns.
///
/// Sessions are created on first recorded turn and live until explicitly
/// closed. State is process-lifetime only: nothing is persisted, and hosts
/// sharing one store across threads must synchronize access themselves.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Vec<SessionTurn>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded turns for a session, oldest first. Empty for unknown ids.
    pub fn history(&self, session_id: &str) -> &[SessionTurn] {
        self.sessions
            .get(session_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record a completed exchange, creating the session on first use.
    pub fn record(
        &mut self,
        session_id: &str,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .push(SessionTurn::new(question, answer));
    }

    /// Dispose of a session. Returns whether it existed.
    pub fn close(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
