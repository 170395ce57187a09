//! File-backed local authentication.
//!
//! Stands in for a hosted auth provider: the opaque user identity lives in
//! a `user_id` file under the data directory. `current_user` mints and
//! persists an id on first use; `sign_out` removes the file, invalidating
//! the local credential. The core only ever sees the `AuthClient` trait.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use threadly_core::auth::AuthClient;
use threadly_types::error::AuthError;
use threadly_types::user::UserId;

/// Name of the credential file inside the data directory.
const USER_ID_FILE: &str = "user_id";

/// Local, file-backed implementation of `AuthClient`.
pub struct LocalAuth {
    path: PathBuf,
}

impl LocalAuth {
    /// Create an auth client storing its credential under `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(USER_ID_FILE),
        }
    }
}

fn storage_error(err: std::io::Error) -> AuthError {
    AuthError::Storage(err.to_string())
}

impl AuthClient for LocalAuth {
    async fn current_user(&self) -> Result<UserId, AuthError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let id = Uuid::parse_str(content.trim())
                    .map_err(|e| AuthError::Storage(format!("corrupt user_id file: {e}")))?;
                Ok(UserId(id))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let user = UserId::new();
                tokio::fs::write(&self.path, user.to_string())
                    .await
                    .map_err(storage_error)?;
                info!(user_id = %user, "Created local user identity");
                Ok(user)
            }
            Err(err) => Err(storage_error(err)),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Local credential removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(AuthError::NotSignedIn),
            Err(err) => Err(storage_error(err)),
        }
    }
}
