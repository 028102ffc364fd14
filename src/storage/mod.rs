//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryDocumentStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDocumentStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::DocumentStore;
use anyhow::{Result, bail};
use std::sync::Arc;

/// Construct the store selected by the configuration
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => Ok(Arc::new(
            SqliteDocumentStore::connect(&config.database_url).await?,
        )),
        #[cfg(feature = "in-memory")]
        StorageBackend::InMemory => {
            tracing::warn!("using in-memory storage, invoices are lost on restart");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        #[allow(unreachable_patterns)]
        other => bail!("storage backend {:?} is not compiled in", other),
    }
}
