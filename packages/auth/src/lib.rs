// ABOUTME: Jobtrack identity session
// ABOUTME: Holds the current authenticated identity and publishes changes to subscribers

pub mod error;
pub mod session;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use jobtrack_core::Identity;
pub use session::AuthSession;
