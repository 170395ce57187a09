//! Business logic and port trait definitions for Threadly.
//!
//! This crate defines the "ports" (collaborator traits) that the
//! infrastructure layer implements -- persistence, completion, and
//! authentication -- plus the session state machine that mediates every
//! transition between user intents and those collaborators. It depends
//! only on `threadly-types`, never on `threadly-infra` or any database/IO
//! crate.

pub mod auth;
pub mod chat;
pub mod llm;
pub mod session;
