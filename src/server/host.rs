//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds everything a transport needs to expose the invoice
//! API: the invoice service (store + patch engine) and the configuration.
//! It is the single source of truth for application state; there is no
//! process-wide singleton.

use crate::config::AppConfig;
use crate::core::{DocumentStore, InvoiceService, PatchEngine};
use std::path::Path;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(Arc::new(InMemoryDocumentStore::new()), AppConfig::default());
/// let app = RestExposure::build_router(Arc::new(host))?;
/// ```
pub struct ServerHost {
    /// Effective configuration
    pub config: Arc<AppConfig>,

    /// Invoice operations over the configured store
    pub invoices: InvoiceService,
}

impl ServerHost {
    /// Build the host from a store and the configuration
    ///
    /// The patch engine mode is taken from `config.patch.mode`.
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        let engine = PatchEngine::new(config.patch.mode);
        Self {
            invoices: InvoiceService::new(store, engine),
            config: Arc::new(config),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.config.uploads.dir
    }
}
