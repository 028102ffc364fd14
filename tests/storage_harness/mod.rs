//! Shared test harness for storage backend testing
//!
//! Provides invoice document builders and the `document_store_tests!` macro
//! that validates any `DocumentStore` implementation against the full
//! contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod document_store_tests;

use invoice_store::core::Document;
use serde_json::{Value, json};

/// Turn a `json!` object literal into a `Document`
pub fn doc(value: Value) -> Document {
    value
        .as_object()
        .cloned()
        .expect("test documents must be JSON objects")
}

/// The reference invoice used across scenarios
pub fn acme_invoice() -> Document {
    doc(json!({
        "seller": {"name": "Acme"},
        "invoice_number": "FV/1",
        "currency": "PLN",
        "net_total": 100,
        "vat_total": 23,
        "gross_total": 123
    }))
}

/// A complete invoice with a distinct number, issuer and totals
pub fn numbered_invoice(n: u32) -> Document {
    doc(json!({
        "seller": {"name": format!("Seller {}", n), "nip": "525-000-00-00"},
        "buyer": {"name": "Buyer"},
        "invoice_number": format!("FV/{}/2024", n),
        "dates": {"issue_date": "2024-01-01", "due_date": "2024-01-15"},
        "currency": "PLN",
        "net_total": n * 100,
        "vat_total": n * 23,
        "gross_total": n * 123,
        "items": [{"name": "Service", "qty": 1, "net": n * 100}]
    }))
}
