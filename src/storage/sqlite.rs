//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteDocumentStore`, a `DocumentStore` backed by a SQLite
//! database via `sqlx::SqlitePool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag (enabled by default).
//!
//! # Schema
//!
//! Records live in a single `invoices` table: an autoincrement `seq` column
//! that fixes creation order, the record `id` (UUID text), one column per
//! summary field and the full document serialized as JSON text in
//! `json_data`.

use crate::core::{
    Document, DocumentStore, InvoiceError, Record, RecordId, RecordSummary, SummaryColumn,
    SummaryProjection,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

fn column_definition(column: SummaryColumn) -> String {
    if column.is_numeric() {
        format!("{} REAL NOT NULL DEFAULT 0", column.column_name())
    } else {
        format!("{} TEXT NOT NULL DEFAULT ''", column.column_name())
    }
}

/// Create the `invoices` table and its index (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), InvoiceError> {
    let summary_columns = SummaryColumn::ALL.map(column_definition).join(",\n            ");
    let create_table = format!(
        "CREATE TABLE IF NOT EXISTS invoices (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            {},
            json_data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        summary_columns
    );
    sqlx::query(&create_table)
        .execute(pool)
        .await
        .map_err(|e| InvoiceError::storage("create invoices table", e))?;

    let create_index = format!(
        "CREATE INDEX IF NOT EXISTS idx_invoices_invoice_number ON invoices ({})",
        SummaryColumn::InvoiceNumber.column_name()
    );
    sqlx::query(&create_index)
        .execute(pool)
        .await
        .map_err(|e| InvoiceError::storage("create invoice_number index", e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Summary column names in `SummaryColumn::ALL` order, matching the row tuples
static SUMMARY_COLUMN_LIST: LazyLock<String> =
    LazyLock::new(|| SummaryColumn::ALL.map(SummaryColumn::column_name).join(", "));

static SUMMARY_COLUMNS: LazyLock<String> =
    LazyLock::new(|| format!("id, {}", *SUMMARY_COLUMN_LIST));

static RECORD_COLUMNS: LazyLock<String> = LazyLock::new(|| {
    format!(
        "id, {}, json_data, created_at, updated_at",
        *SUMMARY_COLUMN_LIST
    )
});

static INSERT_INVOICE: LazyLock<String> = LazyLock::new(|| {
    let placeholders = vec!["?"; SummaryColumn::ALL.len() + 4].join(", ");
    format!(
        "INSERT INTO invoices ({}) VALUES ({})",
        *RECORD_COLUMNS, placeholders
    )
});

static UPDATE_INVOICE: LazyLock<String> = LazyLock::new(|| {
    let assignments = SummaryColumn::ALL
        .map(|column| format!("{} = ?", column.column_name()))
        .join(", ");
    format!(
        "UPDATE invoices SET {}, json_data = ?, updated_at = ? WHERE id = ?",
        assignments
    )
});

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Bind every summary column, in `SummaryColumn::ALL` order
fn bind_summary<'q>(mut query: SqliteQuery<'q>, summary: &SummaryProjection) -> SqliteQuery<'q> {
    for column in SummaryColumn::ALL {
        let value = summary.value_of(column);
        query = if column.is_numeric() {
            query.bind(value.as_f64().unwrap_or(0.0))
        } else {
            query.bind(value.as_str().unwrap_or_default().to_string())
        };
    }
    query
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

type SummaryRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    f64,
    f64,
    f64,
);

type RecordRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    f64,
    f64,
    f64,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

fn parse_id(id: &str) -> Result<RecordId, InvoiceError> {
    RecordId::parse(id).map_err(|e| InvoiceError::Deserialization {
        id: id.to_string(),
        message: format!("invalid record id: {}", e),
    })
}

fn parse_document(id: &str, json_data: &str) -> Result<Document, InvoiceError> {
    serde_json::from_str(json_data).map_err(|e| InvoiceError::Deserialization {
        id: id.to_string(),
        message: e.to_string(),
    })
}

fn summary_from_row(row: SummaryRow) -> Result<RecordSummary, InvoiceError> {
    let (id, issuer_name, invoice_number, issue_date, due_date, currency, net, vat, gross) = row;
    Ok(RecordSummary {
        id: parse_id(&id)?,
        projection: SummaryProjection {
            issuer_name,
            invoice_number,
            issue_date,
            due_date,
            currency,
            net_total: net,
            vat_total: vat,
            gross_total: gross,
        },
    })
}

fn record_from_row(row: RecordRow) -> Result<Record, InvoiceError> {
    let (
        id,
        issuer_name,
        invoice_number,
        issue_date,
        due_date,
        currency,
        net,
        vat,
        gross,
        json_data,
        created_at,
        updated_at,
    ) = row;
    Ok(Record {
        id: parse_id(&id)?,
        document: parse_document(&id, &json_data)?,
        summary: SummaryProjection {
            issuer_name,
            invoice_number,
            issue_date,
            due_date,
            currency,
            net_total: net,
            vat_total: vat,
            gross_total: gross,
        },
        created_at,
        updated_at,
    })
}

fn serialize_document(document: &Document) -> Result<String, InvoiceError> {
    serde_json::to_string(document).map_err(|e| InvoiceError::storage("serialize document", e))
}

// ---------------------------------------------------------------------------
// SqliteDocumentStore
// ---------------------------------------------------------------------------

/// Document store backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// use invoice_store::storage::SqliteDocumentStore;
///
/// let store = SqliteDocumentStore::connect("sqlite://invoices.db").await?;
/// let id = store.create(document).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Wrap an existing pool. The schema must already exist, see [`ensure_schema`].
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `url` and apply the schema
    pub async fn connect(url: &str) -> Result<Self, InvoiceError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| InvoiceError::storage("parse database url", e))?
            .create_if_missing(true);

        // An in-memory database lives only as long as its connections, so it
        // must stay on a single, never-recycled one.
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| InvoiceError::storage("connect", e))?;

        ensure_schema(&pool).await?;
        tracing::info!(url, "sqlite document store ready");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create(&self, document: Document) -> Result<RecordId, InvoiceError> {
        let record = Record::new(document);
        let json_data = serialize_document(&record.document)?;
        let summary = &record.summary;

        let query = sqlx::query(INSERT_INVOICE.as_str()).bind(record.id.to_string());
        bind_summary(query, summary)
            .bind(&json_data)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| InvoiceError::storage("create invoice", e))?;

        tracing::debug!(record_id = %record.id, invoice_number = %summary.invoice_number, "invoice stored");
        Ok(record.id)
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>, InvoiceError> {
        let sql = format!("SELECT {} FROM invoices WHERE id = ?", *RECORD_COLUMNS);
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| InvoiceError::storage("get invoice", e))?;

        row.map(record_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Document>, InvoiceError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT id, json_data FROM invoices ORDER BY seq DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InvoiceError::storage("list invoices", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, json_data)| match parse_document(&id, &json_data) {
                Ok(document) => Some(document),
                Err(e) => {
                    tracing::warn!(record_id = %id, error = %e, "skipping unreadable invoice");
                    None
                }
            })
            .collect())
    }

    async fn list_summaries(&self) -> Result<Vec<RecordSummary>, InvoiceError> {
        let sql = format!("SELECT {} FROM invoices ORDER BY seq DESC", *SUMMARY_COLUMNS);
        let rows = sqlx::query_as::<_, SummaryRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| InvoiceError::storage("list invoice summaries", e))?;

        rows.into_iter().map(summary_from_row).collect()
    }

    async fn find_record_by_invoice_number(
        &self,
        number: &str,
    ) -> Result<Option<Record>, InvoiceError> {
        let sql = format!(
            "SELECT {} FROM invoices WHERE invoice_number = ? ORDER BY seq ASC LIMIT 1",
            *RECORD_COLUMNS
        );
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| InvoiceError::storage("find invoice", e))?;

        row.map(record_from_row).transpose()
    }

    async fn replace_document(
        &self,
        id: &RecordId,
        document: Document,
    ) -> Result<(), InvoiceError> {
        let summary = SummaryProjection::from_document(&document);
        let json_data = serialize_document(&document)?;

        // Rolled back on drop if any step fails
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| InvoiceError::storage("begin transaction", e))?;

        let result = bind_summary(sqlx::query(UPDATE_INVOICE.as_str()), &summary)
            .bind(&json_data)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| InvoiceError::storage("replace invoice", e))?;

        if result.rows_affected() == 0 {
            return Err(InvoiceError::not_found(id.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| InvoiceError::storage("commit transaction", e))?;

        Ok(())
    }
}
