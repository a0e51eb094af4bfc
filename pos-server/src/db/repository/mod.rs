//! Repository Module
//!
//! CRUD operations per entity over the embedded SurrealDB store.
//!
//! Soft delete is a repository-layer invariant: every read query carries
//! `is_deleted = false` and delete operations only flip the flag. Handlers
//! never re-check the flag themselves.

pub mod image;
pub mod item;
pub mod profile;
pub mod session;
pub mod transaction;
pub mod user;

pub use image::ImageRepository;
pub use item::ItemRepository;
pub use profile::ProfileRepository;
pub use session::SessionRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

use crate::utils::AppError;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a [`RecordId`] from an API-supplied id string.
///
/// Accepts both the full `"table:key"` form and a bare key; angle-bracket
/// escaping from rendered record ids is stripped.
pub fn make_record_id(table: &str, id: &str) -> RecordId {
    let key = id.strip_prefix(&format!("{table}:")).unwrap_or(id);
    let key = key.trim_start_matches('⟨').trim_end_matches('⟩');
    RecordId::from_table_key(table, key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_record_id_accepts_both_forms() {
        let a = make_record_id("items", "items:abc123");
        let b = make_record_id("items", "abc123");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "items:abc123");
    }

    #[test]
    fn make_record_id_strips_brackets() {
        let id = make_record_id("items", "items:⟨abc-123⟩");
        assert_eq!(id, make_record_id("items", "abc-123"));
    }
}
