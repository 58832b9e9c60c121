//! In-memory session repository.
//!
//! Implements [`SessionRepository`] on dashmap. Sessions and transcripts
//! are ephemeral UI state: persistence is an explicit non-goal, so nothing
//! survives a restart.

use dashmap::DashMap;
use uuid::Uuid;

use waypoint_core::chat::repository::SessionRepository;
use waypoint_types::chat::{ChatMessage, ChatSession};
use waypoint_types::error::RepositoryError;

/// Dashmap-backed session store.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: DashMap<Uuid, ChatSession>,
    messages: DashMap<Uuid, Vec<ChatMessage>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        if self.sessions.contains_key(&session.id) {
            return Err(RepositoryError::Conflict(format!(
                "session {} already exists",
                session.id
            )));
        }
        self.sessions.insert(session.id, session.clone());
        self.messages.insert(session.id, Vec::new());
        Ok(session.clone())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self.sessions.get(session_id).map(|s| s.clone()))
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        let mut sessions: Vec<ChatSession> =
            self.sessions.iter().map(|entry| entry.value().clone()).collect();
        sessions.sort_by_key(|s| s.started_at);
        Ok(sessions)
    }

    async fn update_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        if !self.sessions.contains_key(&session.id) {
            return Err(RepositoryError::NotFound);
        }
        self.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        self.sessions
            .remove(session_id)
            .ok_or(RepositoryError::NotFound)?;
        self.messages.remove(session_id);
        Ok(())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        // Bump the count under the session entry first so a concurrent
        // reader never sees a message the count does not cover.
        let mut session = self
            .sessions
            .get_mut(&message.session_id)
            .ok_or(RepositoryError::NotFound)?;
        session.message_count += 1;
        drop(session);

        self.messages
            .entry(message.session_id)
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        Ok(self
            .messages
            .get(session_id)
            .map(|m| m.clone())
            .unwrap_or_default())
    }

    async fn clear_messages(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or(RepositoryError::NotFound)?;
        session.message_count = 0;
        drop(session);

        self.messages.insert(*session_id, Vec::new());
        Ok(())
    }
}
