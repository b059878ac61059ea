// ABOUTME: Identity contract for the authenticated actor
// ABOUTME: Carries uid, email and optional display name supplied by the auth provider

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::split_display_name;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity uid cannot be empty")]
    EmptyUid,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

/// The authenticated actor as reported by the external auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Display name, or an empty string when the provider did not supply one
    pub fn display_name_or_empty(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }

    /// `(first_name, last_name)` derived from the display name
    pub fn name_parts(&self) -> (String, String) {
        split_display_name(self.display_name.as_deref())
    }

    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.uid.trim().is_empty() {
            return Err(IdentityError::EmptyUid);
        }
        if !self.email.contains('@') {
            return Err(IdentityError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}
