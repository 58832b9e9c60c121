//! Chat session, message, and collected-info types for Waypoint.
//!
//! These types model one conversation between a user and the assistant:
//! the ordered transcript, and the partially-filled `CollectedInfo` record
//! that the slot-filling protocol accumulates across turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Assistant,
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSender::User => write!(f, "user"),
            MessageSender::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageSender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageSender::User),
            "assistant" => Ok(MessageSender::Assistant),
            other => Err(format!("invalid message sender: '{other}'")),
        }
    }
}

/// A single message within a chat session.
///
/// Messages are append-only and immutable once created, ordered by
/// `created_at` within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender: MessageSender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A chat session between a user and the assistant.
///
/// Sessions are ephemeral: they live in memory for the duration of the
/// process and are never persisted. `collected_info` is the slot-filling
/// state accumulated across the session's turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub message_count: u32,
    pub collected_info: CollectedInfo,
}

/// Partially-filled information record accumulated across a conversation.
///
/// Fields only move from `None` to populated, or get overwritten by a newer
/// non-null value from the latest judgment. A null in an update never
/// reverts a populated field. The record is reset only on explicit session
/// clear. Completeness is decided by the external inference service, never
/// inferred locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedInfo {
    pub location: Option<String>,
    pub purpose: Option<String>,
    pub preferences: Option<Vec<String>>,
}

impl CollectedInfo {
    /// Apply a partial update, keeping existing values where the update
    /// carries nothing.
    ///
    /// Non-null update fields win; null update fields are ignored.
    pub fn merge_from(&mut self, update: &CollectedInfo) {
        if update.location.is_some() {
            self.location = update.location.clone();
        }
        if update.purpose.is_some() {
            self.purpose = update.purpose.clone();
        }
        if update.preferences.is_some() {
            self.preferences = update.preferences.clone();
        }
    }

    /// Whether every slot is populated.
    ///
    /// Informational only: the turn protocol acts on the upstream
    /// judgment's completeness report, not on this.
    pub fn is_complete(&self) -> bool {
        self.location.is_some() && self.purpose.is_some() && self.preferences.is_some()
    }
}
