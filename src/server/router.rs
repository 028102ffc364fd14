//! Router builder utilities for invoice routes

use crate::server::handlers::{
    AppState, create_invoice, list_invoice_summaries, list_invoices, list_upload_files,
    update_invoice,
};
use axum::{
    Router,
    routing::{get, patch},
};

/// Build invoice routes
///
/// - GET   /invoices            - List all invoice documents
/// - POST  /invoices            - Store a new invoice
/// - GET   /invoices/summaries  - List summary rows
/// - PATCH /invoices/update     - Set one field by dotted path
/// - GET   /debug/files         - List the uploads directory
pub fn build_invoice_routes(state: AppState) -> Router {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/summaries", get(list_invoice_summaries))
        .route("/invoices/update", patch(update_invoice))
        .route("/debug/files", get(list_upload_files))
        .with_state(state)
}
