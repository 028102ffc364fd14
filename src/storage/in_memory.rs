//! In-memory implementation of DocumentStore for testing and development

use crate::core::{Document, DocumentStore, InvoiceError, Record, RecordId, RecordSummary};
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory document store
///
/// Records are kept in creation order. Uses RwLock for thread-safe access;
/// every operation holds the lock only for its own duration.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    records: Arc<RwLock<Vec<Record>>>,
}

impl InMemoryDocumentStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Record>>, InvoiceError> {
        self.records
            .read()
            .map_err(|e| InvoiceError::storage("acquire read lock", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Record>>, InvoiceError> {
        self.records
            .write()
            .map_err(|e| InvoiceError::storage("acquire write lock", e))
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, document: Document) -> Result<RecordId, InvoiceError> {
        let record = Record::new(document);
        let id = record.id;

        self.write()?.push(record);

        Ok(id)
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, InvoiceError> {
        Ok(self.read()?.iter().find(|r| &r.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Document>, InvoiceError> {
        Ok(self
            .read()?
            .iter()
            .rev()
            .map(|r| r.document.clone())
            .collect())
    }

    async fn list_summaries(&self) -> Result<Vec<RecordSummary>, InvoiceError> {
        Ok(self.read()?.iter().rev().map(Record::summary_row).collect())
    }

    async fn find_record_by_invoice_number(
        &self,
        number: &str,
    ) -> Result<Option<Record>, InvoiceError> {
        Ok(self
            .read()?
            .iter()
            .find(|r| r.summary.invoice_number == number)
            .cloned())
    }

    async fn replace_document(
        &self,
        id: &RecordId,
        document: Document,
    ) -> Result<(), InvoiceError> {
        let mut records = self.write()?;

        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| InvoiceError::not_found(id.to_string()))?;

        record.replace_document(document);

        Ok(())
    }
}
