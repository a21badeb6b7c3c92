//! Authentication error types.

use thiserror::Error;

use freightline_core::EmailError;

use crate::db::RepositoryError;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password combination is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the given identity.
    #[error("user not found")]
    UserNotFound,

    /// Registration attempted with an email that is already taken.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password fails the policy; the message is safe to show the user.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Hashing or hash parsing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
