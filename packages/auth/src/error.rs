// ABOUTME: Error types for identity session operations
// ABOUTME: Rejected identities and missing authentication

use jobtrack_core::IdentityError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid identity: {0}")]
    InvalidIdentity(#[from] IdentityError),
}
