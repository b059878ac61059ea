// ABOUTME: Document store contract
// ABOUTME: Async get/set/update primitives with create-if-absent semantics

use async_trait::async_trait;

use crate::document::{Document, SetOptions, WriteResult};
use crate::error::StoreResult;
use crate::path::DocumentPath;

/// Minimal document database used by the settings layer.
///
/// Adapters must resolve every `server_timestamp()` sentinel in a write to the
/// returned `WriteResult::write_time`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short adapter name for logs
    fn name(&self) -> &'static str;

    /// Fetch a document; `Ok(None)` when it does not exist
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>>;

    /// Create or overwrite a document, or deep-merge into it with `SetOptions::merge()`
    async fn set(
        &self,
        path: &DocumentPath,
        doc: Document,
        options: SetOptions,
    ) -> StoreResult<WriteResult>;

    /// Replace only the supplied fields of an existing document.
    ///
    /// Fails with `StoreError::NotFound` when the document does not exist.
    async fn update(&self, path: &DocumentPath, partial: Document) -> StoreResult<WriteResult>;

    async fn exists(&self, path: &DocumentPath) -> StoreResult<bool> {
        Ok(self.get(path).await?.is_some())
    }
}
