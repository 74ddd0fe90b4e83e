//! Note lifecycle coordination.
//!
//! A note is one metadata record plus at most one attachment object, living in
//! two independently-failing backends. This module owns the ordering and
//! consistency policy between them:
//! - create writes metadata only (the attachment was uploaded out-of-band)
//! - delete removes the object strictly before the record, so a crash
//!   mid-delete leaves at worst an orphaned object, never a dangling reference

mod error;
mod service;
mod types;

pub use error::NoteError;
pub use service::{NoteService, NoteStore};
pub use types::{CreateNoteInput, Note};
