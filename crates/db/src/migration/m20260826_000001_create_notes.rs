//! Notes table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(NOTES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS notes;").await?;
        Ok(())
    }
}

const NOTES_SQL: &str = r"
-- Notes table: one record per note, keyed by identity alone.
-- attachment_ref holds the URL of the attachment object, when one exists.
CREATE TABLE notes (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    attachment_ref TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Index for the store-native listing order
CREATE INDEX idx_notes_created ON notes(created_at DESC);
";
