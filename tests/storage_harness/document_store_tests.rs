//! Macro-generated test suite for `DocumentStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use invoice_store::storage::InMemoryDocumentStore;
//!
//! document_store_tests!(InMemoryDocumentStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Create & lookup
//! - `test_create_then_find_returns_equal_document`
//! - `test_create_projects_summary_columns`
//! - `test_create_without_projection_fields_uses_defaults`
//! - `test_create_with_non_finite_totals_projects_zero`
//! - `test_find_unknown_invoice_number_is_not_found`
//! - `test_get_unknown_id_is_none`
//! - `test_duplicate_invoice_numbers_first_match_wins`
//!
//! ## Listing
//! - `test_list_empty`
//! - `test_list_is_reverse_creation_order`
//! - `test_summaries_are_reverse_creation_order`
//!
//! ## Replace
//! - `test_replace_document_refreshes_projection`
//! - `test_replace_unknown_id_leaves_store_unchanged`
//!
//! ## Concurrency
//! - `test_concurrent_creates`

/// Generate a full `DocumentStore` conformance test suite.
///
/// `$factory` must evaluate to a store implementing `DocumentStore`. It is
/// re-evaluated for each test to ensure isolation. For the concurrent test,
/// the store must also implement `Clone + 'static` (shared state).
#[macro_export]
macro_rules! document_store_tests {
    ($factory:expr) => {
        mod document_store_contract_tests {
            use super::*;
            use invoice_store::core::{DocumentStore, InvoiceError, RecordId, SummaryProjection};
            use serde_json::json;

            // ==================================================================
            // Create & lookup
            // ==================================================================

            #[tokio::test]
            async fn test_create_then_find_returns_equal_document() {
                let store = $factory;
                let invoice = acme_invoice();

                store.create(invoice.clone()).await.unwrap();

                let found = store.find_by_invoice_number("FV/1").await.unwrap();
                assert_eq!(found, invoice);
            }

            #[tokio::test]
            async fn test_create_projects_summary_columns() {
                let store = $factory;
                let id = store.create(acme_invoice()).await.unwrap();

                let record = store.get(&id).await.unwrap().expect("record should exist");
                assert_eq!(
                    record.summary,
                    SummaryProjection {
                        issuer_name: "Acme".to_string(),
                        invoice_number: "FV/1".to_string(),
                        issue_date: String::new(),
                        due_date: String::new(),
                        currency: "PLN".to_string(),
                        net_total: 100.0,
                        vat_total: 23.0,
                        gross_total: 123.0,
                    }
                );
            }

            #[tokio::test]
            async fn test_create_without_projection_fields_uses_defaults() {
                let store = $factory;
                let id = store
                    .create(doc(json!({"notes": "no summary fields at all"})))
                    .await
                    .unwrap();

                let record = store.get(&id).await.unwrap().unwrap();
                assert_eq!(record.summary, SummaryProjection::default());
                assert_eq!(record.document["notes"], "no summary fields at all");
            }

            #[tokio::test]
            async fn test_create_with_non_finite_totals_projects_zero() {
                let store = $factory;
                let invoice = doc(json!({
                    "invoice_number": "FV/1",
                    "net_total": "NaN",
                    "vat_total": "1e999",
                    "gross_total": "inf"
                }));

                let id = store.create(invoice.clone()).await.unwrap();

                let record = store.get(&id).await.unwrap().unwrap();
                assert_eq!(record.document, invoice);
                assert_eq!(record.summary.net_total, 0.0);
                assert_eq!(record.summary.vat_total, 0.0);
                assert_eq!(record.summary.gross_total, 0.0);

                let summaries = store.list_summaries().await.unwrap();
                assert_eq!(summaries[0].projection.gross_total, 0.0);
            }

            #[tokio::test]
            async fn test_find_unknown_invoice_number_is_not_found() {
                let store = $factory;
                store.create(acme_invoice()).await.unwrap();

                let err = store.find_by_invoice_number("FV/404").await.unwrap_err();
                assert!(matches!(err, InvoiceError::NotFound { .. }), "got {:?}", err);
            }

            #[tokio::test]
            async fn test_get_unknown_id_is_none() {
                let store = $factory;
                assert!(store.get(&RecordId::new()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_duplicate_invoice_numbers_first_match_wins() {
                let store = $factory;
                let first = store
                    .create(doc(json!({"invoice_number": "FV/1", "copy": 1})))
                    .await
                    .unwrap();
                store
                    .create(doc(json!({"invoice_number": "FV/1", "copy": 2})))
                    .await
                    .unwrap();

                let record = store
                    .find_record_by_invoice_number("FV/1")
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(record.id, first);
                assert_eq!(record.document["copy"], 1);

                // No deduplication: both copies are listed
                assert_eq!(store.list_all().await.unwrap().len(), 2);
            }

            // ==================================================================
            // Listing
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list_all().await.unwrap().is_empty());
                assert!(store.list_summaries().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_is_reverse_creation_order() {
                let store = $factory;
                let created: Vec<_> = (1..=5).map(numbered_invoice).collect();
                for invoice in &created {
                    store.create(invoice.clone()).await.unwrap();
                }

                let listed = store.list_all().await.unwrap();
                let expected: Vec<_> = created.into_iter().rev().collect();
                assert_eq!(listed, expected);
            }

            #[tokio::test]
            async fn test_summaries_are_reverse_creation_order() {
                let store = $factory;
                let mut ids = Vec::new();
                for n in 1..=3 {
                    ids.push(store.create(numbered_invoice(n)).await.unwrap());
                }

                let summaries = store.list_summaries().await.unwrap();
                let listed_ids: Vec<_> = summaries.iter().map(|s| s.id).collect();
                ids.reverse();
                assert_eq!(listed_ids, ids);

                assert_eq!(summaries[0].projection.invoice_number, "FV/3/2024");
                assert_eq!(summaries[0].projection.issuer_name, "Seller 3");
                assert_eq!(summaries[0].projection.gross_total, 369.0);
                assert_eq!(summaries[2].projection.due_date, "2024-01-15");
            }

            // ==================================================================
            // Replace
            // ==================================================================

            #[tokio::test]
            async fn test_replace_document_refreshes_projection() {
                let store = $factory;
                let id = store.create(acme_invoice()).await.unwrap();

                let mut updated = acme_invoice();
                updated.insert("currency".into(), json!("EUR"));
                updated.insert("seller".into(), json!({"name": "Acme GmbH"}));
                updated.insert("dates".into(), json!({"issue_date": "2024-03-01"}));
                store.replace_document(&id, updated.clone()).await.unwrap();

                let record = store.get(&id).await.unwrap().unwrap();
                assert_eq!(record.id, id);
                assert_eq!(record.document, updated);
                assert_eq!(record.summary.currency, "EUR");
                assert_eq!(record.summary.issuer_name, "Acme GmbH");
                assert_eq!(record.summary.issue_date, "2024-03-01");
                assert_eq!(record.summary.net_total, 100.0);

                let summaries = store.list_summaries().await.unwrap();
                assert_eq!(summaries.len(), 1);
                assert_eq!(summaries[0].projection, record.summary);
            }

            #[tokio::test]
            async fn test_replace_unknown_id_leaves_store_unchanged() {
                let store = $factory;
                store.create(acme_invoice()).await.unwrap();
                let before = store.list_all().await.unwrap();

                let err = store
                    .replace_document(&RecordId::new(), numbered_invoice(9))
                    .await
                    .unwrap_err();
                assert!(matches!(err, InvoiceError::NotFound { .. }), "got {:?}", err);

                assert_eq!(store.list_all().await.unwrap(), before);
                assert!(store.find_by_invoice_number("FV/9/2024").await.is_err());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let store = $factory;
                let mut handles = Vec::new();
                for n in 1..=10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.create(numbered_invoice(n)).await.unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.list_all().await.unwrap().len(), 10);
                for n in 1..=10 {
                    let number = format!("FV/{}/2024", n);
                    assert!(store.find_by_invoice_number(&number).await.is_ok());
                }
            }
        }
    };
}
