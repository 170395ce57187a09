//! ChatRepository trait definition.
//!
//! Provides CRUD operations for chats and their messages, scoped by an
//! opaque authenticated user identity.

use threadly_types::chat::{Chat, ChatMessage};
use threadly_types::error::RepositoryError;
use threadly_types::llm::MessageRole;
use threadly_types::user::UserId;
use uuid::Uuid;

/// Repository trait for chat and message persistence.
///
/// Implementations live in threadly-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Every call
/// may fail; failures are reported as a `RepositoryError`, never silently.
pub trait ChatRepository: Send + Sync {
    /// List a user's chats, ordered by created_at DESC.
    fn list_chats(
        &self,
        owner: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Insert a new chat and return the persisted record.
    fn insert_chat(
        &self,
        owner: &UserId,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Delete a chat and its messages.
    fn delete_chat(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Update a chat's title.
    fn update_chat_title(
        &self,
        chat_id: &Uuid,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List a chat's messages, ordered by created_at ASC.
    fn list_messages(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Insert a new message and return the persisted record.
    fn insert_message(
        &self,
        chat_id: &Uuid,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;
}
