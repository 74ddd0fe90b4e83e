//! Core business logic for Notedrop.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `note` - Note lifecycle coordination across the metadata and object stores
//! - `storage` - Object storage adapter and upload credential issuance

pub mod note;
pub mod storage;
