//! Note management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::AppState;
use crate::routes::error_response;
use notedrop_core::note::{CreateNoteInput, Note, NoteError, NoteService};
use notedrop_db::NoteRepository;
use notedrop_shared::{AppError, NoteId};

/// Creates the note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", post(create_note))
        .route("/notes", get(list_notes))
        .route("/notes/{id}", get(get_note))
        .route("/notes/{id}", delete(delete_note))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a note.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// URL of an already-uploaded attachment object.
    #[serde(default)]
    pub attachment_ref: Option<String>,
}

/// Response for a note.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    /// Note ID.
    pub id: NoteId,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
    /// Attachment URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_ref: Option<String>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at.to_rfc3339(),
            attachment_ref: note.attachment_ref,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn service(state: &AppState) -> NoteService<NoteRepository> {
    let repo = NoteRepository::new((*state.db).clone());
    NoteService::new(Arc::new(repo), state.storage.clone())
}

/// Lift a note error into the app-wide taxonomy, keeping backend detail
/// out of the caller-facing message.
fn to_app_error(e: &NoteError) -> AppError {
    match e {
        NoteError::Validation(msg) => AppError::Validation(msg.clone()),
        NoteError::NotFound(_) => AppError::NotFound("Note not found".to_string()),
        NoteError::MetadataWrite(_) => AppError::MetadataWrite("Failed to save note".to_string()),
        NoteError::MetadataRead(_) => AppError::MetadataRead("Failed to fetch notes".to_string()),
        NoteError::MetadataDelete(_) => {
            AppError::MetadataDelete("Failed to delete note".to_string())
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/notes`
/// Create a note, optionally referencing an already-uploaded attachment.
async fn create_note(
    State(state): State<AppState>,
    Json(payload): Json<CreateNoteRequest>,
) -> impl IntoResponse {
    let input = CreateNoteInput {
        title: payload.title,
        content: payload.content,
        attachment_ref: payload.attachment_ref,
    };

    match service(&state).create_note(input).await {
        Ok(note) => {
            info!(note_id = %note.id, has_attachment = note.attachment_ref.is_some(), "Note created");
            (StatusCode::CREATED, Json(NoteResponse::from(note))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create note");
            error_response(&to_app_error(&e))
        }
    }
}

/// GET `/notes`
/// List all notes.
async fn list_notes(State(state): State<AppState>) -> impl IntoResponse {
    match service(&state).list_notes().await {
        Ok(notes) => {
            let response: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list notes");
            error_response(&to_app_error(&e))
        }
    }
}

/// GET `/notes/{id}`
/// Fetch a single note by identity.
async fn get_note(State(state): State<AppState>, Path(id): Path<NoteId>) -> impl IntoResponse {
    match service(&state).get_note(id).await {
        Ok(note) => (StatusCode::OK, Json(NoteResponse::from(note))).into_response(),
        Err(e) => {
            if !matches!(e, NoteError::NotFound(_)) {
                error!(note_id = %id, error = %e, "Failed to fetch note");
            }
            error_response(&to_app_error(&e))
        }
    }
}

/// DELETE `/notes/{id}`
/// Delete a note and its attachment object, if any.
async fn delete_note(State(state): State<AppState>, Path(id): Path<NoteId>) -> impl IntoResponse {
    match service(&state).delete_note(id).await {
        Ok(note) => {
            info!(note_id = %note.id, "Note deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "message": format!("Note {} deleted", note.id)
                })),
            )
                .into_response()
        }
        Err(e) => {
            if !matches!(e, NoteError::NotFound(_)) {
                error!(note_id = %id, error = %e, "Failed to delete note");
            }
            error_response(&to_app_error(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_errors_map_to_distinct_codes_and_statuses() {
        let cases = [
            (
                NoteError::validation("Title must not be empty"),
                400,
                "VALIDATION_ERROR",
            ),
            (NoteError::not_found(NoteId::new()), 404, "NOT_FOUND"),
            (
                NoteError::metadata_write("insert failed"),
                500,
                "METADATA_WRITE_FAILED",
            ),
            (
                NoteError::metadata_read("query failed"),
                500,
                "METADATA_READ_FAILED",
            ),
            (
                NoteError::metadata_delete("delete failed"),
                500,
                "METADATA_DELETE_FAILED",
            ),
        ];

        for (err, status, code) in cases {
            let app = to_app_error(&err);
            assert_eq!(app.status_code(), status);
            assert_eq!(app.error_code(), code);
            assert_eq!(error_response(&app).status().as_u16(), status);
        }
    }

    #[test]
    fn test_backend_detail_stays_out_of_the_message() {
        let app = to_app_error(&NoteError::metadata_write("connection to 10.0.0.7 refused"));
        assert_eq!(app.message(), "Failed to save note");

        let app = to_app_error(&NoteError::not_found(NoteId::new()));
        assert_eq!(app.message(), "Note not found");
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let app = to_app_error(&NoteError::validation("Content must not be empty"));
        assert_eq!(app.message(), "Content must not be empty");
    }
}
