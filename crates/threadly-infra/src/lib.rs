//! Infrastructure implementations for Threadly.
//!
//! Concrete adapters behind the port traits defined in `threadly-core`:
//! SQLite persistence (sqlx), the Gemini completion client, file-based
//! local auth, plus configuration and data-directory plumbing.

pub mod auth;
pub mod config;
pub mod filesystem;
pub mod llm;
pub mod sqlite;
