//! Session controller orchestrating chats, messages, and completions.
//!
//! All state transitions execute on one logical task at a time: the state
//! sits behind a `tokio::sync::Mutex` whose guard is never held across an
//! await, so collaborator calls suspend the operation without blocking
//! other intents. Any operation that depends on "the current active chat"
//! re-checks it at resolution time before applying its result.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use threadly_types::chat::{Chat, ChatMessage, DEFAULT_CHAT_TITLE};
use threadly_types::error::SessionError;
use threadly_types::llm::{CompletionRequest, Message, MessageRole};
use threadly_types::model::ModelId;
use threadly_types::user::UserId;

use crate::auth::AuthClient;
use crate::chat::repository::ChatRepository;
use crate::llm::provider::CompletionProvider;
use crate::session::state::{SessionSnapshot, SessionState};

/// System instruction sent with every completion request.
const SYSTEM_PROMPT: &str = "you are a helpful assistant.";

/// Tuning knobs for the session controller.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model selected when the session starts (and after sign-out).
    pub default_model: ModelId,
    /// Maximum tokens per completion response.
    pub max_tokens: u32,
    /// Sampling temperature for completions.
    pub temperature: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_model: ModelId::default(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// What became of a dispatched send intent.
///
/// A send issued with empty input or while a previous send is still in
/// flight is ignored rather than failed: no queueing, no concurrent
/// completions per chat.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// Both turns were persisted and appended.
    Sent {
        user: ChatMessage,
        assistant: ChatMessage,
    },
    /// The intent was dropped without touching any state.
    Ignored,
}

/// Owns the mutable session state and mediates every transition between
/// user intents and the persistence, completion, and auth collaborators.
///
/// Generic over the three port traits so the core never depends on
/// threadly-infra; tests pin them to in-process stubs, the CLI pins them
/// to SQLite, Gemini, and the local auth store.
pub struct SessionController<R, P, A> {
    repo: Arc<R>,
    provider: Arc<P>,
    auth: Arc<A>,
    config: SessionConfig,
    state: Mutex<SessionState>,
}

impl<R, P, A> SessionController<R, P, A>
where
    R: ChatRepository,
    P: CompletionProvider,
    A: AuthClient,
{
    /// Create a controller in the `Idle` phase.
    pub fn new(repo: Arc<R>, provider: Arc<P>, auth: Arc<A>, config: SessionConfig) -> Self {
        let state = Mutex::new(SessionState::new(config.default_model));
        Self {
            repo,
            provider,
            auth,
            config,
            state,
        }
    }

    /// Read-only snapshot for the presentation layer.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Replace the chat list with the user's chats, newest first.
    ///
    /// On failure the existing list is left unchanged and the error is
    /// surfaced; there is no automatic retry.
    pub async fn load_chats(&self, user: &UserId) -> Result<(), SessionError> {
        let chats = self
            .repo
            .list_chats(user)
            .await
            .map_err(SessionError::Fetch)?;

        let mut state = self.state.lock().await;
        info!(count = chats.len(), "Chat list loaded");
        state.chats = chats;
        Ok(())
    }

    /// Create a chat with the default title and make it active.
    pub async fn create_chat(&self, user: &UserId) -> Result<Chat, SessionError> {
        let chat = self
            .repo
            .insert_chat(user, DEFAULT_CHAT_TITLE)
            .await
            .map_err(SessionError::Create)?;

        let mut state = self.state.lock().await;
        state.chats.insert(0, chat.clone());
        state.set_active(Some(chat.clone()));
        info!(chat_id = %chat.id, "Chat created");
        Ok(chat)
    }

    /// Make `chat` active and fetch its message log.
    ///
    /// The active chat switches synchronously; the log is fetched
    /// asynchronously and applied only if the selection is still current
    /// when the fetch resolves. A superseded fetch result -- success or
    /// failure -- is discarded silently.
    pub async fn select_chat(&self, chat: Chat) -> Result<(), SessionError> {
        let chat_id = chat.id;
        let generation = {
            let mut state = self.state.lock().await;
            state.set_active(Some(chat))
        };

        match self.repo.list_messages(&chat_id).await {
            Ok(messages) => {
                let mut state = self.state.lock().await;
                if state.fetch_generation == generation {
                    state.messages = messages;
                } else {
                    info!(chat_id = %chat_id, "Discarding stale message fetch");
                }
                Ok(())
            }
            Err(err) => {
                let state = self.state.lock().await;
                if state.fetch_generation == generation {
                    // Messages stay cleared; the selection itself stands.
                    Err(SessionError::Fetch(err))
                } else {
                    info!(chat_id = %chat_id, "Discarding stale message fetch failure");
                    Ok(())
                }
            }
        }
    }

    /// Delete a chat after the store confirms the deletion.
    ///
    /// Never removes the chat locally before confirmation. Deleting the
    /// active chat clears the selection and the log, returning to `Idle`.
    pub async fn delete_chat(&self, chat_id: &Uuid) -> Result<(), SessionError> {
        self.repo
            .delete_chat(chat_id)
            .await
            .map_err(SessionError::Delete)?;

        let mut state = self.state.lock().await;
        state.chats.retain(|c| c.id != *chat_id);
        if state.active_chat.as_ref().is_some_and(|c| c.id == *chat_id) {
            state.set_active(None);
        }
        info!(chat_id = %chat_id, "Chat deleted");
        Ok(())
    }

    /// Rename a chat. A trimmed-empty title is a no-op, not an error.
    pub async fn rename_chat(&self, chat_id: &Uuid, new_title: &str) -> Result<(), SessionError> {
        let title = new_title.trim();
        if title.is_empty() {
            return Ok(());
        }

        self.repo
            .update_chat_title(chat_id, title)
            .await
            .map_err(SessionError::Rename)?;

        let mut state = self.state.lock().await;
        if let Some(chat) = state.chats.iter_mut().find(|c| c.id == *chat_id) {
            chat.title = title.to_string();
        }
        if let Some(active) = state.active_chat.as_mut()
            && active.id == *chat_id
        {
            active.title = title.to_string();
        }
        info!(chat_id = %chat_id, "Chat renamed");
        Ok(())
    }

    /// Send a user message and obtain the assistant's reply.
    ///
    /// Requires an active chat; empty input and sends dispatched while a
    /// completion is already in flight are ignored. The sequence persists
    /// the user message, invokes the completion backend, then persists the
    /// reply; each step's failure halts the rest and surfaces a distinct
    /// error kind. The user message always precedes the assistant message,
    /// and a step-3 failure leaves a user-visible partial turn (message
    /// sent, no reply) rather than rolling anything back.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome, SessionError> {
        let content = text.trim();
        if content.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        // Guard and flag update happen under one lock so no interleaved
        // send can pass the guard while this one is suspended.
        let (chat, model) = {
            let mut state = self.state.lock().await;
            let Some(chat) = state.active_chat.clone() else {
                return Err(SessionError::NoActiveChat);
            };
            if state.pending_request {
                info!(chat_id = %chat.id, "Send ignored: completion already in flight");
                return Ok(SendOutcome::Ignored);
            }
            state.pending_request = true;
            (chat, state.selected_model)
        };

        // Step 1: persist the user message, then append (confirmation-first).
        let user_message = match self
            .repo
            .insert_message(&chat.id, MessageRole::User, content)
            .await
        {
            Ok(message) => message,
            Err(err) => {
                self.state.lock().await.pending_request = false;
                return Err(SessionError::SendPersist(err));
            }
        };
        {
            let mut state = self.state.lock().await;
            if state.active_chat.as_ref().is_some_and(|c| c.id == chat.id) {
                state.messages.push(user_message.clone());
            }
        }

        // Step 2: completion round trip. On failure the user message stays
        // persisted and appended; nothing is rolled back or retried.
        let request = CompletionRequest {
            model: model.to_string(),
            messages: vec![Message {
                role: MessageRole::User,
                content: content.to_string(),
            }],
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
        };
        let response = match self.provider.complete(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(chat_id = %chat.id, error = %err, "Completion failed");
                self.state.lock().await.pending_request = false;
                return Err(SessionError::Completion(err));
            }
        };

        // Step 3: persist the assistant reply. Failure leaves the partial
        // turn terminal for this exchange.
        let assistant_message = match self
            .repo
            .insert_message(&chat.id, MessageRole::Assistant, &response.content)
            .await
        {
            Ok(message) => message,
            Err(err) => {
                self.state.lock().await.pending_request = false;
                return Err(SessionError::SendPersist(err));
            }
        };

        let mut state = self.state.lock().await;
        state.pending_request = false;
        if state.active_chat.as_ref().is_some_and(|c| c.id == chat.id) {
            state.messages.push(assistant_message.clone());
        }
        info!(chat_id = %chat.id, model = %model, "Turn completed");
        Ok(SendOutcome::Sent {
            user: user_message,
            assistant: assistant_message,
        })
    }

    /// Select the completion model. Pure local mutation.
    pub async fn select_model(&self, id: &str) -> Result<ModelId, SessionError> {
        let model: ModelId = id
            .parse()
            .map_err(|_| SessionError::InvalidModel(id.to_string()))?;
        self.state.lock().await.selected_model = model;
        Ok(model)
    }

    /// Discard all in-memory state and invalidate credentials.
    ///
    /// Local state is dropped regardless of whether the auth collaborator
    /// accepts the invalidation; a failure there is logged, not surfaced.
    pub async fn sign_out(&self) {
        if let Err(err) = self.auth.sign_out().await {
            warn!(error = %err, "Credential invalidation failed");
        }
        let mut state = self.state.lock().await;
        *state = SessionState::new(self.config.default_model);
        info!("Signed out; session state discarded");
    }
}
