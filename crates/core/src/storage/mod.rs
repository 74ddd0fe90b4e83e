//! Object storage for note attachments using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, DigitalOcean Spaces
//! - Azure Blob Storage
//! - Local filesystem (development only)
//!
//! Besides plain put/delete, the service issues short-lived presigned upload
//! URLs so clients write attachment bytes directly to the store without
//! routing them through the server.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{StorageService, UploadCredential, object_key_from_ref};
