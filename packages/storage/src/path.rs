// ABOUTME: Validated document paths
// ABOUTME: Collection/document segment pairs such as users/{uid}/settings/preferences

use std::fmt;
use std::str::FromStr;

use jobtrack_core::{PREFERENCES_DOCUMENT, SETTINGS_COLLECTION, USERS_COLLECTION};

use crate::error::StoreError;

/// Slash-separated path with an even number of non-empty segments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    pub fn new<I, S>(segments: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() || segments.len() % 2 != 0 {
            return Err(StoreError::InvalidPath(format!(
                "expected collection/document pairs, got {} segment(s)",
                segments.len()
            )));
        }

        for segment in &segments {
            if segment.trim().is_empty() || segment.contains('/') {
                return Err(StoreError::InvalidPath(format!(
                    "invalid segment '{}'",
                    segment
                )));
            }
        }

        Ok(Self { segments })
    }

    /// Root document for an identity: `users/{uid}`
    pub fn user(uid: &str) -> Result<Self, StoreError> {
        Self::new([USERS_COLLECTION, uid])
    }

    /// Settings document for an identity: `users/{uid}/settings/preferences`
    pub fn user_settings(uid: &str) -> Result<Self, StoreError> {
        Self::new([
            USERS_COLLECTION,
            uid,
            SETTINGS_COLLECTION,
            PREFERENCES_DOCUMENT,
        ])
    }

    /// Id of the addressed document (last segment)
    pub fn id(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Path of the document that owns this document's collection, if any
    pub fn parent_document(&self) -> Option<DocumentPath> {
        if self.segments.len() <= 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 2].to_vec(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for DocumentPath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim_matches('/').split('/'))
    }
}
