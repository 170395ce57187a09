//! The chat session state machine.
//!
//! `SessionController` owns the in-memory representation of the chat list,
//! the active chat, its message log, and the pending-request flag, and
//! mediates every transition between user intents and the persistence and
//! completion collaborators. The presentation layer only reads snapshots
//! and dispatches intents; it never mutates state directly.

pub mod controller;
pub mod state;

pub use controller::{SendOutcome, SessionConfig, SessionController};
pub use state::{Phase, SessionSnapshot, SessionState};
