//! Core module: documents, the patch engine and the storage trait

pub mod error;
pub mod invoices;
pub mod patch;
pub mod projection;
pub mod record;
pub mod service;

pub use error::{ErrorResponse, InvoiceError};
pub use invoices::{InvoiceService, PatchOutcome};
pub use patch::{DottedPath, PatchEngine, PatchMode};
pub use projection::{SummaryColumn, SummaryProjection};
pub use record::{Document, Record, RecordId, RecordSummary};
pub use service::DocumentStore;
