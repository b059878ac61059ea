// ABOUTME: In-memory document store
// ABOUTME: Process-local adapter with a write-denial switch for simulating rejected writes

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{
    apply_field_updates, deep_merge, resolve_sentinels, Document, SetOptions, WriteResult,
};
use crate::error::{StoreError, StoreResult};
use crate::path::DocumentPath;
use crate::store::DocumentStore;

#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<DocumentPath, Document>>,
    deny_writes: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent write with `StoreError::PermissionDenied`
    pub fn deny_writes(&self, deny: bool) {
        self.deny_writes.store(deny, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn check_writable(&self, path: &DocumentPath) -> StoreResult<()> {
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(StoreError::PermissionDenied(format!(
                "writes to {} are not allowed",
                path
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        debug!("memory get {}", path);
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn set(
        &self,
        path: &DocumentPath,
        mut doc: Document,
        options: SetOptions,
    ) -> StoreResult<WriteResult> {
        self.check_writable(path)?;
        debug!("memory set {} (merge: {})", path, options.merge);

        let write_time = Utc::now();
        resolve_sentinels(&mut doc, write_time);

        let mut documents = self.documents.write().await;
        if options.merge {
            if let Some(existing) = documents.get_mut(path) {
                deep_merge(existing, doc);
                return Ok(WriteResult { write_time });
            }
        }
        documents.insert(path.clone(), doc);

        Ok(WriteResult { write_time })
    }

    async fn update(&self, path: &DocumentPath, mut partial: Document) -> StoreResult<WriteResult> {
        self.check_writable(path)?;
        debug!("memory update {}", path);

        let write_time = Utc::now();
        resolve_sentinels(&mut partial, write_time);

        let mut documents = self.documents.write().await;
        let existing = documents
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        apply_field_updates(existing, partial)?;

        Ok(WriteResult { write_time })
    }
}
