//! Completion collaborator abstractions.

pub mod provider;
