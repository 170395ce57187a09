//! Shared domain types for Threadly.
//!
//! This crate contains the domain types used across the Threadly chat
//! application: chats, messages, model identifiers, users, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod user;
