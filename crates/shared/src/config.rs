//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration (optional; uploads are disabled without it).
    #[serde(default)]
    pub storage: Option<StorageSettings>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Object storage settings.
///
/// Mirrors the provider shapes understood by the core storage service; the
/// server binary converts these into a `StorageConfig` at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend.
    pub backend: StorageBackend,
    /// Presigned upload URL TTL in seconds.
    #[serde(default = "default_presign_ttl")]
    pub presign_upload_ttl_secs: u64,
    /// Allowed content types for upload credentials (empty = allow any).
    #[serde(default)]
    pub allowed_content_types: Vec<String>,
}

fn default_presign_ttl() -> u64 {
    300 // 5 minutes
}

/// Storage backend selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageBackend {
    /// S3-compatible storage.
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// Bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Azure Blob Storage.
    AzureBlob {
        /// Storage account name.
        account: String,
        /// Storage access key.
        access_key: String,
        /// Container name.
        container: String,
    },
    /// Local filesystem (development only).
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("NOTEDROP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_settings_defaults() {
        let json = r#"{"backend": {"type": "local_fs", "root": "./storage"}}"#;
        let settings: StorageSettings = serde_json::from_str(json).expect("valid settings");
        assert_eq!(settings.presign_upload_ttl_secs, 300);
        assert!(settings.allowed_content_types.is_empty());
        assert!(matches!(settings.backend, StorageBackend::LocalFs { .. }));
    }

    #[test]
    fn test_storage_backend_s3() {
        let json = r#"{
            "type": "s3",
            "endpoint": "https://account.r2.cloudflarestorage.com",
            "bucket": "notes",
            "access_key_id": "key",
            "secret_access_key": "secret",
            "region": "auto"
        }"#;
        let backend: StorageBackend = serde_json::from_str(json).expect("valid backend");
        assert!(matches!(backend, StorageBackend::S3 { .. }));
    }
}
