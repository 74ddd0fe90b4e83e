//! `SeaORM` Entity for the notes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Note record, keyed by identity alone.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    /// Note identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body.
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// URL of the attachment object, if any.
    pub attachment_ref: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// No relations; notes stand alone.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
