//! Chat and message types for Threadly.
//!
//! A `Chat` is a named, user-owned conversation thread; a `ChatMessage` is
//! one turn within it. Messages are immutable once created and ordered by
//! `created_at` ascending within their chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::llm::MessageRole;
use crate::user::UserId;

/// Default title given to a freshly created chat.
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// A named conversation thread owned by exactly one user.
///
/// Created via explicit user action, mutated only by rename, destroyed via
/// explicit delete. Persists in the backing store beyond the UI session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    pub owner_id: UserId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A single turn within a chat, authored by the user or the assistant.
///
/// There is no edit/update operation: a message, once persisted, is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
