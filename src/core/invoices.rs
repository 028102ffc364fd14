//! Invoice operations composed from the patch engine and a document store

use crate::core::error::InvoiceError;
use crate::core::patch::{DottedPath, PatchEngine};
use crate::core::projection::SummaryColumn;
use crate::core::record::{Document, RecordId, RecordSummary};
use crate::core::service::DocumentStore;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Result of a successful single-field patch
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatchOutcome {
    pub id: RecordId,
    pub field: String,
    pub value: Value,
    /// Summary columns whose source the patch wrote to
    pub refreshed_columns: Vec<SummaryColumn>,
}

/// Invoice operations over an explicitly constructed store
///
/// Cloning is cheap: the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn DocumentStore>,
    engine: PatchEngine,
}

impl InvoiceService {
    pub fn new(store: Arc<dyn DocumentStore>, engine: PatchEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn engine(&self) -> &PatchEngine {
        &self.engine
    }

    pub async fn create(&self, document: Document) -> Result<RecordId, InvoiceError> {
        let id = self.store.create(document).await?;
        tracing::debug!(record_id = %id, "invoice created");
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<Document>, InvoiceError> {
        self.store.list_all().await
    }

    pub async fn summaries(&self) -> Result<Vec<RecordSummary>, InvoiceError> {
        self.store.list_summaries().await
    }

    /// Set `field` of the invoice numbered `number` to `value`
    ///
    /// The path is validated before the store is touched. Find and replace
    /// are two separate units of work: two concurrent patches of the same
    /// invoice race, and the last write wins.
    pub async fn patch(
        &self,
        number: &str,
        field: &str,
        value: Value,
    ) -> Result<PatchOutcome, InvoiceError> {
        let path = DottedPath::parse(field)?;

        let record = self
            .store
            .find_record_by_invoice_number(number)
            .await?
            .ok_or_else(|| InvoiceError::not_found(number))?;

        let document = self.engine.apply(record.document, &path, value.clone())?;
        self.store.replace_document(&record.id, document).await?;

        let refreshed_columns = SummaryColumn::affected_by(&path);
        tracing::info!(
            record_id = %record.id,
            invoice_number = number,
            field,
            refreshed = ?refreshed_columns,
            "invoice patched"
        );

        Ok(PatchOutcome {
            id: record.id,
            field: field.to_string(),
            value,
            refreshed_columns,
        })
    }
}
