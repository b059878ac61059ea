// ABOUTME: Document store contract and adapters for Jobtrack
// ABOUTME: Paths, server-timestamp sentinels, in-memory and SQLite backends

pub mod document;
pub mod error;
pub mod factory;
pub mod memory;
pub mod path;
pub mod sqlite;
pub mod store;

// Re-export main types
pub use document::{
    is_server_timestamp, server_timestamp, Document, SetOptions, WriteResult,
};
pub use error::{StoreError, StoreResult};
pub use factory::StoreFactory;
pub use memory::MemoryDocumentStore;
pub use path::DocumentPath;
pub use sqlite::SqliteDocumentStore;
pub use store::DocumentStore;
