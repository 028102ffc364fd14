//! Records: the persisted unit of the invoice store

use crate::core::projection::SummaryProjection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// An invoice document: an arbitrary nested JSON object
pub type Document = Map<String, Value>;

/// Identifier assigned to a record at creation; never changes afterwards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier read back from storage
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored invoice: identifier, full document and its summary projection
///
/// The summary is always derived from `document`; construct records through
/// [`Record::new`] or [`Record::replace_document`] so the two never drift.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub document: Document,
    pub summary: SummaryProjection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Build a new record with a fresh identifier
    pub fn new(document: Document) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            summary: SummaryProjection::from_document(&document),
            document,
            created_at: now,
            updated_at: now,
        }
    }

    /// Swap the body and re-run the projection, keeping the identifier
    pub fn replace_document(&mut self, document: Document) {
        self.summary = SummaryProjection::from_document(&document);
        self.document = document;
        self.updated_at = Utc::now();
    }

    pub fn summary_row(&self) -> RecordSummary {
        RecordSummary {
            id: self.id,
            projection: self.summary.clone(),
        }
    }
}

/// List row built from the summary columns only
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: RecordId,
    #[serde(flatten)]
    pub projection: SummaryProjection,
}
