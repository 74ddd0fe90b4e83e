//! Storage service implementation using Apache OpenDAL.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use opendal::{Operator, services};
use percent_encoding::percent_decode_str;
use url::Url;
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Namespace prefix for all attachment objects. Keeps attachments sweepable
/// without touching unrelated keys in a shared bucket.
const KEY_NAMESPACE: &str = "notes";

/// A short-lived capability authorizing one direct upload to the object store.
#[derive(Debug, Clone)]
pub struct UploadCredential {
    /// The presigned upload URL.
    pub upload_url: String,
    /// HTTP method to use (PUT).
    pub method: String,
    /// Required headers for the upload request.
    pub headers: HashMap<String, String>,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// Storage key the credential writes to.
    pub object_key: String,
}

/// Object store adapter for note attachments.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Generate the storage key for an upload.
    ///
    /// Format: `notes/{token}/{sanitized_filename}`. The token is request
    /// scoped and random, so concurrent uploads of identically named files
    /// never collide.
    #[must_use]
    pub fn generate_object_key(token: Uuid, filename: &str) -> String {
        format!(
            "{KEY_NAMESPACE}/{token}/{}",
            sanitize_filename(filename)
        )
    }

    /// Issue a presigned upload credential for a single direct PUT.
    ///
    /// The declared content type is checked against the configured allowlist
    /// but never against the bytes that end up being uploaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is rejected, presigning is not
    /// supported, or the provider fails.
    pub async fn request_upload(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadCredential, StorageError> {
        if !self.config.is_content_type_allowed(content_type) {
            return Err(StorageError::invalid_content_type(content_type));
        }

        let token = Uuid::new_v4();
        let key = Self::generate_object_key(token, filename);
        let ttl = Duration::from_secs(self.config.presign_upload_ttl_secs);

        let presigned = self
            .operator
            .presign_write(&key, ttl)
            .await
            .map_err(StorageError::from)?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());

        Ok(UploadCredential {
            upload_url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            headers,
            expires_at: Utc::now()
                + chrono::Duration::seconds(
                    i64::try_from(self.config.presign_upload_ttl_secs).unwrap_or(i64::MAX),
                ),
            object_key: key,
        })
    }

    /// Write an object directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), StorageError> {
        self.operator
            .write(key, data)
            .await
            .map(|_| ())
            .map_err(StorageError::from)
    }

    /// Delete an object from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if an object exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Derive the storage key from an attachment reference URL.
///
/// The reference is the public object URL recorded on the note; the key is
/// its percent-decoded path with the leading slash stripped.
///
/// # Errors
///
/// Returns an error if the reference is not a valid URL or has an empty path.
pub fn object_key_from_ref(attachment_ref: &str) -> Result<String, StorageError> {
    let url = Url::parse(attachment_ref)
        .map_err(|e| StorageError::invalid_ref(format!("{attachment_ref}: {e}")))?;

    let path = percent_decode_str(url.path())
        .decode_utf8()
        .map_err(|e| StorageError::invalid_ref(e.to_string()))?;

    let key = path.trim_start_matches('/');
    if key.is_empty() {
        return Err(StorageError::invalid_ref("empty object path"));
    }

    Ok(key.to_string())
}

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_service(dir: &std::path::Path) -> StorageService {
        let config = StorageConfig::new(StorageProvider::local_fs(dir));
        StorageService::from_config(config).expect("should create service")
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("receipt.pdf"), "receipt.pdf");
        assert_eq!(sanitize_filename("my file (1).pdf"), "my_file__1_.pdf");
        assert_eq!(sanitize_filename("test@#$%.doc"), "test____.doc");
        assert_eq!(sanitize_filename("日本語.png"), "___.png");
    }

    #[test]
    fn test_generate_object_key() {
        let token = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").expect("valid uuid");
        let key = StorageService::generate_object_key(token, "receipt.png");
        assert_eq!(
            key,
            "notes/550e8400-e29b-41d4-a716-446655440000/receipt.png"
        );
    }

    #[test]
    fn test_object_key_from_ref() {
        let key = object_key_from_ref("https://bucket.example.com/notes/abc/receipt.png")
            .expect("valid ref");
        assert_eq!(key, "notes/abc/receipt.png");
    }

    #[test]
    fn test_object_key_from_ref_percent_decoded() {
        let key = object_key_from_ref("https://bucket.example.com/notes/abc/my%20file.png")
            .expect("valid ref");
        assert_eq!(key, "notes/abc/my file.png");
    }

    #[test]
    fn test_object_key_from_ref_invalid() {
        assert!(object_key_from_ref("not a url").is_err());
        assert!(object_key_from_ref("https://bucket.example.com/").is_err());
    }

    #[tokio::test]
    async fn test_request_upload_rejects_disallowed_content_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StorageConfig::new(StorageProvider::local_fs(dir.path()))
            .with_allowed_content_types(vec!["image/png".to_string()]);
        let service = StorageService::from_config(config).expect("should create service");

        let err = service
            .request_upload("evil.exe", "application/x-executable")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidContentType { .. }));
    }

    #[tokio::test]
    async fn test_put_exists_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = local_service(dir.path());

        let key = "notes/token/receipt.png";
        assert!(!service.exists(key).await);

        service.put(key, b"bytes".to_vec()).await.expect("put");
        assert!(service.exists(key).await);

        service.delete(key).await.expect("delete");
        assert!(!service.exists(key).await);
    }

    #[tokio::test]
    async fn test_delete_missing_object_is_tolerated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = local_service(dir.path());

        // OpenDAL delete is idempotent; a missing key is not an error.
        assert!(service.delete("notes/none/missing.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_directory_key_is_a_backend_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = local_service(dir.path());

        // A key shadowed by a non-empty directory cannot be removed as an
        // object; the backend reports a real error, not a missing key.
        service
            .put("notes/token/receipt.png/archive.bin", b"bytes".to_vec())
            .await
            .expect("put");

        let err = service
            .delete("notes/token/receipt.png")
            .await
            .expect_err("delete should fail");
        assert!(!err.is_not_found());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Sanitized filenames only contain characters safe in storage paths.
    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }
    }

    // Every generated key lives under the notes/ namespace with the
    // token as its second segment, so orphan sweeping stays feasible.
    proptest! {
        #[test]
        fn prop_object_key_shape(filename in "[a-zA-Z0-9_-]{1,50}\\.[a-z]{2,4}") {
            let token = Uuid::new_v4();
            let key = StorageService::generate_object_key(token, &filename);

            let parts: Vec<&str> = key.split('/').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert_eq!(parts[0], "notes");
            prop_assert_eq!(parts[1], token.to_string());
            prop_assert_eq!(parts[2], filename);
        }
    }

    // Keys survive the round trip through a public object URL.
    proptest! {
        #[test]
        fn prop_object_key_url_roundtrip(filename in "[a-zA-Z0-9_-]{1,30}\\.[a-z]{2,4}") {
            let token = Uuid::new_v4();
            let key = StorageService::generate_object_key(token, &filename);
            let url = format!("https://bucket.example.com/{key}");

            let derived = object_key_from_ref(&url).expect("valid ref");
            prop_assert_eq!(derived, key);
        }
    }
}
