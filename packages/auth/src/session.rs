// ABOUTME: Current-identity holder backed by a watch channel
// ABOUTME: Sign-in providers push identities here; settings layers subscribe to changes

use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{AuthError, AuthResult};
use jobtrack_core::Identity;

/// Tracks who is signed in.
///
/// Provider flows (email/password, federated sign-in) live outside this crate
/// and report their result through `sign_in`.
pub struct AuthSession {
    sender: watch::Sender<Option<Identity>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSession {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Record a successful sign-in. Re-signing the same identity does not notify.
    pub fn sign_in(&self, identity: Identity) -> AuthResult<()> {
        identity.validate()?;
        info!("Identity signed in: {}", identity.uid);

        self.sender.send_if_modified(|current| {
            if current.as_ref() == Some(&identity) {
                debug!("Identity unchanged, not notifying subscribers");
                return false;
            }
            *current = Some(identity);
            true
        });
        Ok(())
    }

    /// Clear the current identity. Returns false when nobody was signed in.
    pub fn sign_out(&self) -> bool {
        let was_signed_in = self.sender.send_if_modified(|current| current.take().is_some());
        if was_signed_in {
            info!("Identity signed out");
        }
        was_signed_in
    }

    pub fn current(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    /// Current identity or `AuthError::NotAuthenticated`
    pub fn require(&self) -> AuthResult<Identity> {
        self.current().ok_or(AuthError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Receiver that observes every identity change from now on
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_core::IdentityError;

    fn jane() -> Identity {
        Identity::new("uid-jane", "jane@example.com").with_display_name("Jane Doe")
    }

    #[test]
    fn test_starts_signed_out() {
        let session = AuthSession::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.require(), Err(AuthError::NotAuthenticated));
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = AuthSession::new();

        session.sign_in(jane()).unwrap();
        assert_eq!(session.current(), Some(jane()));

        assert!(session.sign_out());
        assert!(session.current().is_none());
        assert!(!session.sign_out());
    }

    #[test]
    fn test_rejects_invalid_identity() {
        let session = AuthSession::new();
        let result = session.sign_in(Identity::new("", "jane@example.com"));
        assert_eq!(
            result,
            Err(AuthError::InvalidIdentity(IdentityError::EmptyUid))
        );
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let session = AuthSession::new();
        let mut rx = session.subscribe();

        session.sign_in(jane()).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some(jane()));

        session.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn test_same_identity_does_not_notify() {
        let session = AuthSession::new();
        let mut rx = session.subscribe();

        session.sign_in(jane()).unwrap();
        rx.changed().await.unwrap();
        rx.borrow_and_update();

        session.sign_in(jane()).unwrap();
        assert!(!rx.has_changed().unwrap());
    }
}
