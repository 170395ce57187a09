//! CompletionProvider trait definition.
//!
//! The abstraction over the hosted text-generation service: a prompt and a
//! model identifier in, a full text response out. The contract is a single
//! blocking-from-the-caller's-perspective round trip; no streaming.

use threadly_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion backends (Gemini via its OpenAI-compatible
/// endpoint in production, stubs in tests).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in threadly-infra.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
