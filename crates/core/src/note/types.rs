//! Note types and data structures.

use chrono::{DateTime, Utc};
use notedrop_shared::NoteId;
use serde::{Deserialize, Serialize};

/// Note domain model.
///
/// Immutable after creation; there is no update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier, assigned by the coordinator.
    pub id: NoteId,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Creation timestamp, set once.
    pub created_at: DateTime<Utc>,
    /// URL of the attachment object, if one was uploaded.
    pub attachment_ref: Option<String>,
}

/// Input for creating a note.
#[derive(Debug, Clone)]
pub struct CreateNoteInput {
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// URL of an already-uploaded attachment object.
    pub attachment_ref: Option<String>,
}
