//! Note error types.

use notedrop_shared::NoteId;
use thiserror::Error;

/// Note operation errors.
#[derive(Debug, Error)]
pub enum NoteError {
    /// Input rejected before any backend call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record exists for the given identity.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// Metadata record could not be written.
    #[error("metadata write failed: {0}")]
    MetadataWrite(String),

    /// Metadata record could not be read.
    #[error("metadata read failed: {0}")]
    MetadataRead(String),

    /// Metadata record could not be deleted.
    #[error("metadata delete failed: {0}")]
    MetadataDelete(String),
}

impl NoteError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub const fn not_found(id: NoteId) -> Self {
        Self::NotFound(id)
    }

    /// Create a metadata write error.
    #[must_use]
    pub fn metadata_write(msg: impl Into<String>) -> Self {
        Self::MetadataWrite(msg.into())
    }

    /// Create a metadata read error.
    #[must_use]
    pub fn metadata_read(msg: impl Into<String>) -> Self {
        Self::MetadataRead(msg.into())
    }

    /// Create a metadata delete error.
    #[must_use]
    pub fn metadata_delete(msg: impl Into<String>) -> Self {
        Self::MetadataDelete(msg.into())
    }
}
