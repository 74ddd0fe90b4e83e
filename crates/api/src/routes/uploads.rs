//! Upload credential routes.
//!
//! Clients upload attachment bytes directly to the object store with a
//! short-lived presigned URL; the server never proxies the bytes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::routes::error_response;
use notedrop_core::storage::StorageError;
use notedrop_shared::AppError;

/// Creates the upload credential routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/uploads", post(request_upload))
}

/// Request body for requesting an upload credential.
#[derive(Debug, Deserialize)]
pub struct RequestUploadRequest {
    /// Original filename.
    pub file_name: String,
    /// Declared MIME type; never verified against actual bytes.
    pub file_type: String,
}

/// Response for an upload credential.
#[derive(Debug, Serialize)]
pub struct RequestUploadResponse {
    /// Presigned upload URL.
    pub upload_url: String,
    /// HTTP method to use (PUT).
    pub upload_method: String,
    /// Required headers for the upload.
    pub upload_headers: std::collections::HashMap<String, String>,
    /// When the URL expires (ISO 8601).
    pub expires_at: String,
    /// Storage key the credential writes to.
    pub object_key: String,
}

/// POST `/uploads`
/// Issue a presigned upload credential for one attachment.
async fn request_upload(
    State(state): State<AppState>,
    Json(payload): Json<RequestUploadRequest>,
) -> impl IntoResponse {
    let Some(storage) = &state.storage else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "storage_not_configured",
                "message": "File storage is not configured"
            })),
        )
            .into_response();
    };

    match storage
        .request_upload(&payload.file_name, &payload.file_type)
        .await
    {
        Ok(credential) => {
            info!(object_key = %credential.object_key, "Upload credential issued");

            let response = RequestUploadResponse {
                upload_url: credential.upload_url,
                upload_method: credential.method,
                upload_headers: credential.headers,
                expires_at: credential.expires_at.to_rfc3339(),
                object_key: credential.object_key,
            };

            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to issue upload credential");
            error_response(&to_app_error(&e))
        }
    }
}

/// Lift a storage error into the app-wide taxonomy.
fn to_app_error(e: &StorageError) -> AppError {
    match e {
        StorageError::InvalidContentType { content_type } => {
            AppError::Validation(format!("Content type '{content_type}' is not allowed"))
        }
        _ => AppError::ObjectStorage("Failed to issue upload credential".to_string()),
    }
}
