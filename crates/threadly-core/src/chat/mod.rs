//! Chat persistence abstractions for Threadly.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements for chat and message CRUD.

pub mod repository;
