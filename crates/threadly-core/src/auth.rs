//! AuthClient trait definition.
//!
//! The authentication collaborator is a black box to the core: it supplies
//! the current opaque user identity and invalidates credentials on
//! sign-out. Token issuance and auth screens live entirely outside this
//! crate.

use threadly_types::error::AuthError;
use threadly_types::user::UserId;

/// Trait for the authentication collaborator.
///
/// Implementations live in threadly-infra (e.g., `LocalAuth`).
pub trait AuthClient: Send + Sync {
    /// The currently authenticated user.
    fn current_user(
        &self,
    ) -> impl std::future::Future<Output = Result<UserId, AuthError>> + Send;

    /// Invalidate the current credentials.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;
}
