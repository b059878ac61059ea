// ABOUTME: Factory for document store instances
// ABOUTME: Builds the configured adapter behind a shared trait object

use std::sync::Arc;

use jobtrack_config::{Config, StoreBackend};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::memory::MemoryDocumentStore;
use crate::sqlite::SqliteDocumentStore;
use crate::store::DocumentStore;

/// Factory for creating document store instances
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store from configuration
    pub async fn from_config(config: &Config) -> StoreResult<Arc<dyn DocumentStore>> {
        debug!("Creating document store with backend: {:?}", config.store_backend);

        match config.store_backend {
            StoreBackend::Memory => {
                info!("Using in-memory document store");
                Ok(Self::memory())
            }
            StoreBackend::Sqlite => {
                let store =
                    SqliteDocumentStore::open(&config.database_path, config.max_connections)
                        .await?;
                Ok(Arc::new(store))
            }
        }
    }

    /// Create a store from the process environment
    pub async fn from_env() -> StoreResult<Arc<dyn DocumentStore>> {
        let config = Config::from_env().unwrap_or_else(|e| {
            tracing::warn!("Invalid store configuration ({}), using defaults", e);
            Config::default()
        });
        Self::from_config(&config).await
    }

    pub fn memory() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryDocumentStore::new())
    }
}
