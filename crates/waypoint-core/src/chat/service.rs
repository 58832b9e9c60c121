//! Chat service orchestrating session lifecycle and the transcript.
//!
//! `ChatService` is the session-scoped state object passed by reference to
//! the turn handler: it seeds the greeting into new sessions, appends
//! messages (append-only), applies the monotonic collected-info merge, and
//! owns the per-session turn gate. Generic over `SessionRepository` so the
//! core never depends on a concrete store.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use waypoint_types::chat::{ChatMessage, ChatSession, CollectedInfo, MessageSender};
use waypoint_types::error::{RepositoryError, TurnError};

use crate::chat::gate::{TurnGate, TurnGuard};
use crate::chat::repository::SessionRepository;

/// Orchestrates chat session lifecycle and transcript persistence.
pub struct ChatService<R: SessionRepository> {
    repo: R,
    greeting: String,
    gate: TurnGate,
}

impl<R: SessionRepository> ChatService<R> {
    /// Create a new chat service over the given repository.
    ///
    /// `greeting` is the assistant message seeded into every new or
    /// cleared session.
    pub fn new(repo: R, greeting: String) -> Self {
        Self {
            repo,
            greeting,
            gate: TurnGate::new(),
        }
    }

    // --- Session lifecycle ---

    /// Create a new session with the greeting already in the transcript.
    pub async fn create_session(&self) -> Result<ChatSession, RepositoryError> {
        let session = ChatSession {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            message_count: 0,
            collected_info: CollectedInfo::default(),
        };

        let session = self.repo.create_session(&session).await?;
        self.append_assistant_message(session.id, self.greeting.clone())
            .await?;
        info!(session_id = %session.id, "Session created");

        self.repo
            .get_session(&session.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Get a session by ID.
    pub async fn get_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        self.repo.get_session(session_id).await
    }

    /// List all sessions.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        self.repo.list_sessions().await
    }

    /// Delete a session and its transcript.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        self.repo.delete_session(session_id).await?;
        info!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    /// Clear a session: drop the transcript, reset the collected info,
    /// and re-seed the greeting.
    pub async fn clear_session(&self, session_id: &Uuid) -> Result<ChatSession, RepositoryError> {
        let mut session = self
            .repo
            .get_session(session_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        self.repo.clear_messages(session_id).await?;
        session.collected_info = CollectedInfo::default();
        session.message_count = 0;
        self.repo.update_session(&session).await?;
        self.append_assistant_message(*session_id, self.greeting.clone())
            .await?;
        info!(session_id = %session_id, "Session cleared");

        self.repo
            .get_session(session_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    // --- Transcript ---

    /// Append a user message to a session.
    pub async fn append_user_message(
        &self,
        session_id: Uuid,
        text: String,
    ) -> Result<ChatMessage, RepositoryError> {
        self.append(session_id, MessageSender::User, text).await
    }

    /// Append an assistant message to a session.
    pub async fn append_assistant_message(
        &self,
        session_id: Uuid,
        text: String,
    ) -> Result<ChatMessage, RepositoryError> {
        self.append(session_id, MessageSender::Assistant, text).await
    }

    async fn append(
        &self,
        session_id: Uuid,
        sender: MessageSender,
        text: String,
    ) -> Result<ChatMessage, RepositoryError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            session_id,
            sender,
            text,
            created_at: Utc::now(),
        };
        self.repo.save_message(&message).await?;
        Ok(message)
    }

    /// Get the ordered transcript of a session.
    pub async fn transcript(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.repo.get_messages(session_id).await
    }

    // --- Collected info ---

    /// Merge a partial collected-info update into the session and persist
    /// the result. Returns the merged record.
    pub async fn merge_collected_info(
        &self,
        session_id: &Uuid,
        update: &CollectedInfo,
    ) -> Result<CollectedInfo, RepositoryError> {
        let mut session = self
            .repo
            .get_session(session_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        session.collected_info.merge_from(update);
        self.repo.update_session(&session).await?;
        Ok(session.collected_info)
    }

    // --- Turn gate ---

    /// Claim the single in-flight turn slot for a session.
    pub fn begin_turn(&self, session_id: Uuid) -> Result<TurnGuard, TurnError> {
        self.gate.begin(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal in-process repository for exercising the service.
    #[derive(Default)]
    struct StubRepository {
        sessions: Mutex<HashMap<Uuid, ChatSession>>,
        messages: Mutex<HashMap<Uuid, Vec<ChatMessage>>>,
    }

    impl SessionRepository for StubRepository {
        async fn create_session(
            &self,
            session: &ChatSession,
        ) -> Result<ChatSession, RepositoryError> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id, session.clone());
            Ok(session.clone())
        }

        async fn get_session(
            &self,
            session_id: &Uuid,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self.sessions.lock().unwrap().get(session_id).cloned())
        }

        async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
            let mut sessions: Vec<ChatSession> =
                self.sessions.lock().unwrap().values().cloned().collect();
            sessions.sort_by_key(|s| s.started_at);
            Ok(sessions)
        }

        async fn update_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id, session.clone());
            Ok(())
        }

        async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
            self.sessions
                .lock()
                .unwrap()
                .remove(session_id)
                .ok_or(RepositoryError::NotFound)?;
            self.messages.lock().unwrap().remove(session_id);
            Ok(())
        }

        async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
            if let Some(session) = self.sessions.lock().unwrap().get_mut(&message.session_id) {
                session.message_count += 1;
            }
            self.messages
                .lock()
                .unwrap()
                .entry(message.session_id)
                .or_default()
                .push(message.clone());
            Ok(())
        }

        async fn get_messages(
            &self,
            session_id: &Uuid,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .get(session_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn clear_messages(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
            self.messages.lock().unwrap().remove(session_id);
            if let Some(session) = self.sessions.lock().unwrap().get_mut(session_id) {
                session.message_count = 0;
            }
            Ok(())
        }
    }

    fn service() -> ChatService<StubRepository> {
        ChatService::new(StubRepository::default(), "Welcome!".to_string())
    }

    #[tokio::test]
    async fn test_create_session_seeds_greeting() {
        let svc = service();
        let session = svc.create_session().await.unwrap();
        assert_eq!(session.message_count, 1);

        let transcript = svc.transcript(&session.id).await.unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].sender, MessageSender::Assistant);
        assert_eq!(transcript[0].text, "Welcome!");
    }

    #[tokio::test]
    async fn test_transcript_is_append_only_and_ordered() {
        let svc = service();
        let session = svc.create_session().await.unwrap();

        svc.append_user_message(session.id, "first".to_string())
            .await
            .unwrap();
        svc.append_assistant_message(session.id, "second".to_string())
            .await
            .unwrap();

        let transcript = svc.transcript(&session.id).await.unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].text, "first");
        assert_eq!(transcript[2].text, "second");
    }

    #[tokio::test]
    async fn test_merge_collected_info_is_monotonic() {
        let svc = service();
        let session = svc.create_session().await.unwrap();

        let merged = svc
            .merge_collected_info(
                &session.id,
                &CollectedInfo {
                    location: Some("Hongdae".to_string()),
                    purpose: None,
                    preferences: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(merged.location.as_deref(), Some("Hongdae"));

        // A null update must not revert the populated field.
        let merged = svc
            .merge_collected_info(&session.id, &CollectedInfo::default())
            .await
            .unwrap();
        assert_eq!(merged.location.as_deref(), Some("Hongdae"));
    }

    #[tokio::test]
    async fn test_clear_resets_slots_and_reseeds_greeting() {
        let svc = service();
        let session = svc.create_session().await.unwrap();

        svc.append_user_message(session.id, "quiet cafe in Hongdae".to_string())
            .await
            .unwrap();
        svc.merge_collected_info(
            &session.id,
            &CollectedInfo {
                location: Some("Hongdae".to_string()),
                purpose: Some("cafe".to_string()),
                preferences: Some(vec!["quiet".to_string()]),
            },
        )
        .await
        .unwrap();

        let cleared = svc.clear_session(&session.id).await.unwrap();
        assert_eq!(cleared.collected_info, CollectedInfo::default());
        assert_eq!(cleared.message_count, 1);

        let transcript = svc.transcript(&session.id).await.unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].text, "Welcome!");
    }

    #[tokio::test]
    async fn test_delete_session_removes_everything() {
        let svc = service();
        let session = svc.create_session().await.unwrap();
        svc.delete_session(&session.id).await.unwrap();
        assert!(svc.get_session(&session.id).await.unwrap().is_none());
        assert!(svc.transcript(&session.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_begin_turn_rejects_second_submission() {
        let svc = service();
        let session = svc.create_session().await.unwrap();

        let _guard = svc.begin_turn(session.id).unwrap();
        assert!(matches!(
            svc.begin_turn(session.id),
            Err(TurnError::TurnInProgress)
        ));
    }
}
