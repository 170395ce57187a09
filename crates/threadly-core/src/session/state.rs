//! In-memory session state and its derived phase.
//!
//! `SessionState` is process-local and never persisted. It is exclusively
//! owned by the `SessionController`; everything outside the controller
//! sees it only through `SessionSnapshot` clones.

use serde::Serialize;

use threadly_types::chat::{Chat, ChatMessage};
use threadly_types::model::ModelId;

/// The state machine's current phase, derived from the session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No active chat.
    Idle,
    /// A chat is active and no request is in flight.
    ChatSelected,
    /// A chat is active and a completion request is pending.
    AwaitingCompletion,
}

/// Mutable session state owned by the controller.
///
/// Invariants:
/// - `messages` always belongs to `active_chat`; whenever the active chat
///   changes the log is replaced atomically, never mixed across chats.
/// - At most one completion request is pending at a time.
#[derive(Debug)]
pub struct SessionState {
    /// The user's chats, ordered by created_at DESC, unique by id.
    pub chats: Vec<Chat>,
    /// The chat the log belongs to, if any.
    pub active_chat: Option<Chat>,
    /// Messages of the active chat, ordered by created_at ASC.
    pub messages: Vec<ChatMessage>,
    /// True while an outbound completion request is in flight.
    pub pending_request: bool,
    /// The model completions are requested with.
    pub selected_model: ModelId,
    /// Bumped on every active-chat change; a resolving message fetch is
    /// applied only if its captured generation is still current.
    pub(crate) fetch_generation: u64,
}

impl SessionState {
    /// Fresh state in the `Idle` phase.
    pub fn new(model: ModelId) -> Self {
        Self {
            chats: Vec::new(),
            active_chat: None,
            messages: Vec::new(),
            pending_request: false,
            selected_model: model,
            fetch_generation: 0,
        }
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> Phase {
        match (&self.active_chat, self.pending_request) {
            (None, _) => Phase::Idle,
            (Some(_), false) => Phase::ChatSelected,
            (Some(_), true) => Phase::AwaitingCompletion,
        }
    }

    /// Change the active chat, clearing the message log and invalidating
    /// any outstanding message fetch.
    pub(crate) fn set_active(&mut self, chat: Option<Chat>) -> u64 {
        self.fetch_generation += 1;
        self.active_chat = chat;
        self.messages.clear();
        self.fetch_generation
    }

    /// Read-only clone for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            chats: self.chats.clone(),
            active_chat: self.active_chat.clone(),
            messages: self.messages.clone(),
            pending_request: self.pending_request,
            selected_model: self.selected_model,
        }
    }
}

/// Immutable view of the session state handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub chats: Vec<Chat>,
    pub active_chat: Option<Chat>,
    pub messages: Vec<ChatMessage>,
    pub pending_request: bool,
    pub selected_model: ModelId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use threadly_types::user::UserId;
    use uuid::Uuid;

    fn test_chat() -> Chat {
        Chat {
            id: Uuid::now_v7(),
            owner_id: UserId::new(),
            title: "Test".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_initial_phase_is_idle() {
        let state = SessionState::new(ModelId::default());
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.chats.is_empty());
        assert!(!state.pending_request);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = SessionState::new(ModelId::default());
        state.set_active(Some(test_chat()));
        assert_eq!(state.phase(), Phase::ChatSelected);

        state.pending_request = true;
        assert_eq!(state.phase(), Phase::AwaitingCompletion);

        state.pending_request = false;
        state.set_active(None);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_set_active_clears_log_and_bumps_generation() {
        let mut state = SessionState::new(ModelId::default());
        let chat = test_chat();
        state.messages.push(ChatMessage {
            id: Uuid::now_v7(),
            chat_id: chat.id,
            role: threadly_types::llm::MessageRole::User,
            content: "hi".to_string(),
            created_at: Utc::now(),
        });

        let first = state.set_active(Some(chat));
        assert!(state.messages.is_empty());
        let second = state.set_active(None);
        assert!(second > first);
    }
}
