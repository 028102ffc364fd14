//! Service trait for invoice record storage

use crate::core::error::InvoiceError;
use crate::core::record::{Document, Record, RecordId, RecordSummary};
use async_trait::async_trait;

/// Storage of invoice records
///
/// Implementations persist each document together with its summary
/// projection. Every call is its own unit of work: backends acquire a
/// connection or lock for the duration of the call and release it on every
/// exit path. Nothing is cached between calls.
///
/// Records are never deleted through this trait.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new record and return its identifier
    ///
    /// Missing projection fields fall back to their defaults; only backend
    /// failures produce an error.
    async fn create(&self, document: Document) -> Result<RecordId, InvoiceError>;

    /// Get a record by identifier
    async fn get(&self, id: &RecordId) -> Result<Option<Record>, InvoiceError>;

    /// All document bodies, most recently created first
    ///
    /// Bodies that cannot be deserialized are skipped and logged.
    async fn list_all(&self) -> Result<Vec<Document>, InvoiceError>;

    /// Summary rows read from the projection columns, most recent first
    async fn list_summaries(&self) -> Result<Vec<RecordSummary>, InvoiceError>;

    /// The earliest created record carrying `number` as its invoice number
    ///
    /// Invoice numbers are not unique at this layer; the first match wins.
    async fn find_record_by_invoice_number(
        &self,
        number: &str,
    ) -> Result<Option<Record>, InvoiceError>;

    /// Document of the first record carrying `number`, or `NotFound`
    async fn find_by_invoice_number(&self, number: &str) -> Result<Document, InvoiceError> {
        self.find_record_by_invoice_number(number)
            .await?
            .map(|record| record.document)
            .ok_or_else(|| InvoiceError::not_found(number))
    }

    /// Overwrite the body of `id` and recompute its projection atomically
    ///
    /// Fails with `NotFound` when the identifier is unknown, leaving the
    /// store unchanged.
    async fn replace_document(&self, id: &RecordId, document: Document)
    -> Result<(), InvoiceError>;
}
