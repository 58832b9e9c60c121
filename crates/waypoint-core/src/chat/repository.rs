//! SessionRepository trait definition.
//!
//! Provides CRUD operations for chat sessions and their transcripts.
//! Implementations live in waypoint-infra (e.g., `InMemorySessionRepository`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use uuid::Uuid;
use waypoint_types::chat::{ChatMessage, ChatSession};
use waypoint_types::error::RepositoryError;

/// Repository trait for chat session and transcript storage.
///
/// Sessions are ephemeral by design: the reference implementation is
/// in-memory and nothing survives a restart.
pub trait SessionRepository: Send + Sync {
    /// Create a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// List all sessions, ordered by started_at ascending.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Update an existing chat session (collected info, message count).
    fn update_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a chat session and its transcript.
    fn delete_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a message to a session's transcript.
    ///
    /// The repository atomically increments the session's message_count.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get the transcript of a session, ordered by created_at ascending.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Remove all messages from a session, resetting message_count to 0.
    ///
    /// Keeps the session record intact.
    fn clear_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
