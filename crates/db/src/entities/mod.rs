//! `SeaORM` entity definitions.

pub mod notes;
