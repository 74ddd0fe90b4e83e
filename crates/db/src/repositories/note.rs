//! Note repository for database operations.
//!
//! Implements the core `NoteStore` metadata adapter using SeaORM.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::notes;
use notedrop_core::note::{Note, NoteError, NoteStore};
use notedrop_shared::NoteId;

/// Note repository implementation.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    db: DatabaseConnection,
}

impl NoteRepository {
    /// Create a new note repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl NoteStore for NoteRepository {
    async fn put(&self, note: Note) -> Result<Note, NoteError> {
        let active_model = notes::ActiveModel {
            id: Set(note.id.into_inner()),
            title: Set(note.title.clone()),
            content: Set(note.content.clone()),
            attachment_ref: Set(note.attachment_ref.clone()),
            created_at: Set(note.created_at.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| NoteError::metadata_write(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn get(&self, id: NoteId) -> Result<Option<Note>, NoteError> {
        let model = notes::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| NoteError::metadata_read(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteError> {
        let result = notes::Entity::delete_many()
            .filter(notes::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(|e| NoteError::metadata_delete(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn scan_all(&self) -> Result<Vec<Note>, NoteError> {
        let models = notes::Entity::find()
            .order_by_desc(notes::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| NoteError::metadata_read(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

/// Convert database model to domain model.
fn to_domain(model: notes::Model) -> Note {
    Note {
        id: NoteId::from_uuid(model.id),
        title: model.title,
        content: model.content,
        attachment_ref: model.attachment_ref,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_to_domain_maps_all_fields() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let model = notes::Model {
            id,
            title: "Groceries".to_string(),
            content: "Milk, eggs".to_string(),
            attachment_ref: Some("https://bucket.example.com/notes/abc/receipt.png".to_string()),
            created_at: now.into(),
        };

        let note = to_domain(model);
        assert_eq!(note.id.into_inner(), id);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Milk, eggs");
        assert_eq!(
            note.attachment_ref.as_deref(),
            Some("https://bucket.example.com/notes/abc/receipt.png")
        );
        assert_eq!(note.created_at, now);
    }
}
