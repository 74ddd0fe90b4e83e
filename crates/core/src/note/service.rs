//! Note coordinator implementation.

use std::sync::Arc;

use chrono::Utc;
use notedrop_shared::NoteId;
use tracing::warn;

use super::error::NoteError;
use super::types::{CreateNoteInput, Note};
use crate::storage::{StorageService, object_key_from_ref};

/// Metadata store adapter for note records.
///
/// This trait is implemented by the db crate against the real record store and
/// by in-memory fakes in tests. Records are keyed by identity alone.
pub trait NoteStore: Send + Sync {
    /// Write a note record.
    fn put(
        &self,
        note: Note,
    ) -> impl std::future::Future<Output = Result<Note, NoteError>> + Send;

    /// Point lookup by identity.
    fn get(
        &self,
        id: NoteId,
    ) -> impl std::future::Future<Output = Result<Option<Note>, NoteError>> + Send;

    /// Delete by identity. Returns whether a record was removed.
    fn delete(
        &self,
        id: NoteId,
    ) -> impl std::future::Future<Output = Result<bool, NoteError>> + Send;

    /// Retrieve all records, store-native order.
    fn scan_all(&self) -> impl std::future::Future<Output = Result<Vec<Note>, NoteError>> + Send;
}

/// Coordinates a note's metadata record and its optional attachment object.
///
/// Stateless; safe to construct per request. The object store is optional:
/// without it, notes still work but delete leaves attachment objects in place.
pub struct NoteService<S: NoteStore> {
    store: Arc<S>,
    storage: Option<Arc<StorageService>>,
}

impl<S: NoteStore> NoteService<S> {
    /// Create a new note service.
    #[must_use]
    pub fn new(store: Arc<S>, storage: Option<Arc<StorageService>>) -> Self {
        Self { store, storage }
    }

    /// Create a note.
    ///
    /// The attachment, if referenced, was already uploaded out-of-band with a
    /// presigned credential; this call performs exactly one metadata write and
    /// never touches the object store. A failed write needs no compensation:
    /// the uploaded object is left in place as a harmless orphan.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Validation` for blank title/content (before any
    /// backend call) or `NoteError::MetadataWrite` if the record write fails.
    pub async fn create_note(&self, input: CreateNoteInput) -> Result<Note, NoteError> {
        if input.title.trim().is_empty() {
            return Err(NoteError::validation("title must not be empty"));
        }
        if input.content.trim().is_empty() {
            return Err(NoteError::validation("content must not be empty"));
        }

        let note = Note {
            id: NoteId::new(),
            title: input.title,
            content: input.content,
            created_at: Utc::now(),
            attachment_ref: input.attachment_ref,
        };

        self.store.put(note).await
    }

    /// Fetch a note by identity.
    ///
    /// Returns the stored record verbatim, including the attachment reference.
    /// Whether the referenced object still exists is not checked here; a stale
    /// reference surfaces as a broken link at dereference time.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::NotFound` if no record exists or
    /// `NoteError::MetadataRead` on backend failure.
    pub async fn get_note(&self, id: NoteId) -> Result<Note, NoteError> {
        self.store
            .get(id)
            .await?
            .ok_or(NoteError::NotFound(id))
    }

    /// List all notes.
    ///
    /// Unbounded scan; no filtering or pagination. Ordering is store-native
    /// and not contractual.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::MetadataRead` on backend failure.
    pub async fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        self.store.scan_all().await
    }

    /// Delete a note and its attachment object, if any.
    ///
    /// The object is removed strictly before the record, so a failure between
    /// the two steps orphans the object rather than leaving the record
    /// pointing at nothing. Object-delete failures are soft: an already-gone
    /// object is no reason to keep the record, and other backend errors are
    /// logged and tolerated for this step only.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::NotFound` if no record exists, or
    /// `NoteError::MetadataDelete` if the record removal fails (a retry then
    /// re-runs the idempotent object delete and attempts the record again).
    pub async fn delete_note(&self, id: NoteId) -> Result<Note, NoteError> {
        let note = self
            .store
            .get(id)
            .await?
            .ok_or(NoteError::NotFound(id))?;

        if let Some(attachment_ref) = &note.attachment_ref {
            self.delete_attachment_object(id, attachment_ref).await;
        }

        // A zero-row delete means a concurrent delete won the race; the record
        // is gone either way.
        let _removed = self.store.delete(id).await?;

        Ok(note)
    }

    /// Best-effort removal of the attachment object referenced by a note.
    async fn delete_attachment_object(&self, id: NoteId, attachment_ref: &str) {
        let Some(storage) = &self.storage else {
            warn!(note_id = %id, "Object storage not configured; leaving attachment object in place");
            return;
        };

        let key = match object_key_from_ref(attachment_ref) {
            Ok(key) => key,
            Err(e) => {
                warn!(note_id = %id, error = %e, "Unusable attachment reference; skipping object delete");
                return;
            }
        };

        match storage.delete(&key).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                warn!(note_id = %id, key = %key, error = %e, "Attachment object delete failed; proceeding with record delete");
            }
        }
    }
}
