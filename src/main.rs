//! invoice-store server binary
//!
//! Usage: `invoice-store [config.yaml]`. Without an argument the config path
//! is read from `INVOICE_STORE_CONFIG`; without either, defaults apply.
//! Logging is controlled through `RUST_LOG`.

use anyhow::Result;
use invoice_store::config::{AppConfig, CONFIG_PATH_ENV};
use invoice_store::server::ServerBuilder;
use invoice_store::storage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("invoice_store=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());
    let config = AppConfig::load(config_path.as_deref())?;

    tracing::info!(
        backend = ?config.storage.backend,
        patch_mode = ?config.patch.mode,
        uploads = %config.uploads.dir.display(),
        "starting invoice-store"
    );

    let store = storage::open(&config.storage).await?;

    ServerBuilder::new()
        .with_config(config)
        .with_shared_store(store)
        .serve()
        .await
}
