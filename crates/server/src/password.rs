//! Password hashing.
//!
//! Bcrypt is CPU-bound, so both hashing and verification run on the blocking
//! thread pool instead of stalling the async runtime.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::ServerError;

pub async fn hash_password(password: &str) -> Result<String, ServerError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|err| ServerError::Internal(format!("hashing task failed: {err}")))?
        .map_err(|err| ServerError::Internal(format!("failed to hash password: {err}")))
}

pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, ServerError> {
    let password = password.to_string();
    let hashed = hashed.to_string();
    tokio::task::spawn_blocking(move || verify(password, &hashed))
        .await
        .map_err(|err| ServerError::Internal(format!("hashing task failed: {err}")))?
        .map_err(|err| ServerError::Internal(format!("failed to verify password: {err}")))
}
