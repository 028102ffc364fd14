//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then environment
//! variables override individual settings:
//!
//! | Variable | Setting |
//! |---|---|
//! | `INVOICE_STORE_BIND` | `server.bind` |
//! | `INVOICE_STORE_DATABASE_URL` | `storage.database_url` |
//! | `INVOICE_STORE_UPLOADS_DIR` | `uploads.dir` |
//! | `INVOICE_STORE_PATCH_MODE` | `patch.mode` (`lenient` or `strict`) |

use crate::core::PatchMode;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "INVOICE_STORE_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "0.0.0.0:3012")
    pub bind: String,

    /// Allow any origin, method and header (CORS)
    pub allow_any_origin: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3012".to_string(),
            allow_any_origin: true,
        }
    }
}

/// Which `DocumentStore` implementation to construct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// sqlx connection URL, used by the SQLite backend
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_url: "sqlite://invoices.db".to_string(),
        }
    }
}

/// Directory served under `/uploads` and listed by `/debug/files`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    pub mode: PatchMode,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub uploads: UploadsConfig,
    pub patch: PatchConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Failed to parse '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the optional file, then apply process environment overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("INVOICE_STORE_BIND") {
            self.server.bind = bind;
        }
        if let Some(url) = lookup("INVOICE_STORE_DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Some(dir) = lookup("INVOICE_STORE_UPLOADS_DIR") {
            self.uploads.dir = PathBuf::from(dir);
        }
        if let Some(mode) = lookup("INVOICE_STORE_PATCH_MODE") {
            self.patch.mode = mode
                .parse()
                .map_err(|e| anyhow!("INVOICE_STORE_PATCH_MODE: {}", e))?;
        }
        Ok(self)
    }
}
