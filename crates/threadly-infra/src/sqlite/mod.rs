//! SQLite persistence layer.

pub mod chat;
pub mod pool;
