//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `threadly-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reader pool for
//! SELECTs, writer pool for mutations. Ids are minted here (UUIDv7) so the
//! caller gets back the exact record that was persisted.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use threadly_core::chat::repository::ChatRepository;
use threadly_types::chat::{Chat, ChatMessage};
use threadly_types::error::RepositoryError;
use threadly_types::llm::MessageRole;
use threadly_types::user::UserId;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: String,
    owner_id: String,
    title: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;
        let owner_id = Uuid::parse_str(&self.owner_id)
            .map_err(|e| RepositoryError::Query(format!("invalid owner_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Chat {
            id,
            owner_id: UserId(owner_id),
            title: self.title,
            created_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct MessageRow {
    id: String,
    chat_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let chat_id = Uuid::parse_str(&self.chat_id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            id,
            chat_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn list_chats(&self, owner: &UserId) -> Result<Vec<Chat>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM chats WHERE owner_id = ? ORDER BY created_at DESC")
                .bind(owner.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut chats = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row =
                ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            chats.push(chat_row.into_chat()?);
        }

        Ok(chats)
    }

    async fn insert_chat(&self, owner: &UserId, title: &str) -> Result<Chat, RepositoryError> {
        let chat = Chat {
            id: Uuid::now_v7(),
            owner_id: *owner,
            title: title.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO chats (id, owner_id, title, created_at) VALUES (?, ?, ?, ?)")
            .bind(chat.id.to_string())
            .bind(chat.owner_id.to_string())
            .bind(&chat.title)
            .bind(format_datetime(&chat.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(chat)
    }

    async fn delete_chat(&self, chat_id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(chat_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn update_chat_title(&self, chat_id: &Uuid, title: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE chats SET title = ? WHERE id = ?")
            .bind(title)
            .bind(chat_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_messages(&self, chat_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM messages WHERE chat_id = ? ORDER BY created_at ASC")
                .bind(chat_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn insert_message(
        &self,
        chat_id: &Uuid,
        role: MessageRole,
        content: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            chat_id: *chat_id,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO messages (id, chat_id, role, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.chat_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo(dir: &tempfile::TempDir) -> SqliteChatRepository {
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        SqliteChatRepository::new(pool)
    }

    #[tokio::test]
    async fn insert_and_list_chats_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;
        let owner = UserId::new();

        let first = repo.insert_chat(&owner, "First").await.unwrap();
        let second = repo.insert_chat(&owner, "Second").await.unwrap();

        let chats = repo.list_chats(&owner).await.unwrap();
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, second.id);
        assert_eq!(chats[1].id, first.id);
    }

    #[tokio::test]
    async fn list_chats_is_scoped_by_owner() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;
        let alice = UserId::new();
        let bob = UserId::new();

        repo.insert_chat(&alice, "Alice's").await.unwrap();
        repo.insert_chat(&bob, "Bob's").await.unwrap();

        let chats = repo.list_chats(&alice).await.unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].title, "Alice's");
    }

    #[tokio::test]
    async fn update_chat_title_persists() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;
        let owner = UserId::new();

        let chat = repo.insert_chat(&owner, "Old").await.unwrap();
        repo.update_chat_title(&chat.id, "New").await.unwrap();

        let chats = repo.list_chats(&owner).await.unwrap();
        assert_eq!(chats[0].title, "New");
    }

    #[tokio::test]
    async fn update_missing_chat_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        let err = repo
            .update_chat_title(&Uuid::now_v7(), "Anything")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn delete_chat_cascades_to_messages() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;
        let owner = UserId::new();

        let chat = repo.insert_chat(&owner, "Doomed").await.unwrap();
        repo.insert_message(&chat.id, MessageRole::User, "hi")
            .await
            .unwrap();
        repo.delete_chat(&chat.id).await.unwrap();

        assert!(repo.list_chats(&owner).await.unwrap().is_empty());
        assert!(repo.list_messages(&chat.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_chat_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        let err = repo.delete_chat(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn messages_come_back_in_creation_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;
        let owner = UserId::new();

        let chat = repo.insert_chat(&owner, "Convo").await.unwrap();
        repo.insert_message(&chat.id, MessageRole::User, "question")
            .await
            .unwrap();
        repo.insert_message(&chat.id, MessageRole::Assistant, "answer")
            .await
            .unwrap();

        let messages = repo.list_messages(&chat.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "question");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "answer");
    }

    #[tokio::test]
    async fn message_insert_requires_existing_chat() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        // Foreign keys are enforced; an orphan message is rejected.
        let err = repo
            .insert_message(&Uuid::now_v7(), MessageRole::User, "orphan")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }
}
