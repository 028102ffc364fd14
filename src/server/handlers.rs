//! HTTP handlers for invoice operations

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::{Document, InvoiceError, InvoiceService, RecordId, RecordSummary};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub invoices: InvoiceService,
    pub uploads_dir: Arc<PathBuf>,
}

/// Response for a created invoice
#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub id: RecordId,
}

/// Response for a patched invoice
#[derive(Debug, Serialize)]
pub struct UpdateInvoiceResponse {
    pub status: &'static str,
    pub field: String,
    pub value: Value,
}

/// Store a new invoice
///
/// POST /invoices
///
/// The body must be a JSON object; its content is not validated.
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<CreateInvoiceResponse>, InvoiceError> {
    let Value::Object(document) = body else {
        return Err(InvoiceError::InvalidDocument);
    };

    let id = state.invoices.create(document).await?;

    Ok(Json(CreateInvoiceResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        id,
    }))
}

/// List all invoice documents, newest first
///
/// GET /invoices
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, InvoiceError> {
    Ok(Json(state.invoices.list().await?))
}

/// List summary rows, newest first
///
/// GET /invoices/summaries
pub async fn list_invoice_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecordSummary>>, InvoiceError> {
    Ok(Json(state.invoices.summaries().await?))
}

/// Set one field of an invoice by dotted path
///
/// PATCH /invoices/update
///
/// Body: `{"invoice_number": "...", "field": "dates.issue_date", "value": ...}`.
/// `invoice_number` and `field` must be non-empty strings or numbers; a
/// number is matched by its text form, as the summary column stores it. A
/// missing `value` sets the field to `null`.
pub async fn update_invoice(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UpdateInvoiceResponse>, InvoiceError> {
    let (Some(number), Some(field)) = (
        key_text(body.get("invoice_number")),
        key_text(body.get("field")),
    ) else {
        return Err(InvoiceError::MissingData);
    };
    let value = body.get("value").cloned().unwrap_or(Value::Null);

    let outcome = state.invoices.patch(&number, &field, value).await?;

    Ok(Json(UpdateInvoiceResponse {
        status: "updated",
        field: outcome.field,
        value: outcome.value,
    }))
}

/// List the files in the uploads directory
///
/// GET /debug/files
pub async fn list_upload_files(State(state): State<AppState>) -> Json<Value> {
    match read_file_names(&state.uploads_dir).await {
        Ok(files) => Json(json!({
            "uploads_dir": state.uploads_dir.display().to_string(),
            "files": files,
        })),
        Err(e) => {
            tracing::warn!(dir = %state.uploads_dir.display(), error = %e, "cannot list uploads");
            Json(json!({ "error": e.to_string() }))
        }
    }
}

/// Text of a lookup key; absent, `null`, empty or structured values yield `None`
fn key_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

async fn read_file_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
