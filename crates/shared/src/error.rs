//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Each variant carries the caller-facing message only; backend detail
/// belongs in logs, never in the message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Metadata record could not be written.
    #[error("Metadata write failed: {0}")]
    MetadataWrite(String),

    /// Metadata record could not be read.
    #[error("Metadata read failed: {0}")]
    MetadataRead(String),

    /// Metadata record could not be deleted.
    #[error("Metadata delete failed: {0}")]
    MetadataDelete(String),

    /// Object storage error.
    #[error("Object storage error: {0}")]
    ObjectStorage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::MetadataWrite(_)
            | Self::MetadataRead(_)
            | Self::MetadataDelete(_)
            | Self::ObjectStorage(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::MetadataWrite(_) => "METADATA_WRITE_FAILED",
            Self::MetadataRead(_) => "METADATA_READ_FAILED",
            Self::MetadataDelete(_) => "METADATA_DELETE_FAILED",
            Self::ObjectStorage(_) => "OBJECT_STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the caller-facing message for API responses.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::MetadataWrite(msg)
            | Self::MetadataRead(msg)
            | Self::MetadataDelete(msg)
            | Self::ObjectStorage(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::MetadataWrite(String::new()).status_code(), 500);
        assert_eq!(AppError::MetadataRead(String::new()).status_code(), 500);
        assert_eq!(AppError::MetadataDelete(String::new()).status_code(), 500);
        assert_eq!(AppError::ObjectStorage(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::MetadataWrite(String::new()).error_code(),
            "METADATA_WRITE_FAILED"
        );
        assert_eq!(
            AppError::MetadataRead(String::new()).error_code(),
            "METADATA_READ_FAILED"
        );
        assert_eq!(
            AppError::MetadataDelete(String::new()).error_code(),
            "METADATA_DELETE_FAILED"
        );
        assert_eq!(
            AppError::ObjectStorage(String::new()).error_code(),
            "OBJECT_STORAGE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_message_is_inner_text_only() {
        assert_eq!(AppError::Validation("msg".into()).message(), "msg");
        assert_eq!(AppError::NotFound("msg".into()).message(), "msg");
        assert_eq!(AppError::MetadataWrite("msg".into()).message(), "msg");
        assert_eq!(AppError::MetadataRead("msg".into()).message(), "msg");
        assert_eq!(AppError::MetadataDelete("msg".into()).message(), "msg");
        assert_eq!(AppError::ObjectStorage("msg".into()).message(), "msg");
        assert_eq!(AppError::Internal("msg".into()).message(), "msg");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::MetadataWrite("msg".into()).to_string(),
            "Metadata write failed: msg"
        );
        assert_eq!(
            AppError::MetadataRead("msg".into()).to_string(),
            "Metadata read failed: msg"
        );
        assert_eq!(
            AppError::MetadataDelete("msg".into()).to_string(),
            "Metadata delete failed: msg"
        );
        assert_eq!(
            AppError::ObjectStorage("msg".into()).to_string(),
            "Object storage error: msg"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }
}
