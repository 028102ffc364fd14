//! # invoice-store
//!
//! Storage API for invoice documents.
//!
//! Invoices arrive as arbitrary JSON objects and are persisted whole, next
//! to a fixed set of summary columns (issuer, number, dates, currency,
//! totals) extracted at write time. A single field of a stored invoice can
//! be changed by dotted path (`dates.issue_date`); the summary columns are
//! recomputed on every write.
//!
//! ## Layout
//!
//! - [`core`]: documents, records, the summary projection, the patch engine,
//!   the `DocumentStore` trait and `InvoiceService`
//! - [`storage`]: in-memory and SQLite stores
//! - [`server`]: axum REST exposure
//! - [`config`]: YAML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_store::prelude::*;
//!
//! let service = InvoiceService::new(
//!     Arc::new(InMemoryDocumentStore::new()),
//!     PatchEngine::default(),
//! );
//! service.create(document).await?;
//! service.patch("FV/1", "dates.issue_date", json!("2024-01-01")).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Document, DocumentStore, DottedPath, InvoiceError, InvoiceService, PatchEngine,
        PatchMode, PatchOutcome, Record, RecordId, RecordSummary, SummaryColumn,
        SummaryProjection,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryDocumentStore;
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteDocumentStore;

    // === Config ===
    pub use crate::config::{AppConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
}
