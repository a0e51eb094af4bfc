//! Database Module
//!
//! Embedded SurrealDB connection (RocksDB engine on disk, in-memory engine
//! for tests) plus the entity models and repositories.

pub mod models;
pub mod repository;
pub mod seed;

use crate::utils::AppError;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::Surreal;

const NAMESPACE: &str = "pos";
const DATABASE: &str = "pos";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database under `data_dir/database`
    pub async fn connect(data_dir: &str) -> Result<Self, AppError> {
        let path = std::path::Path::new(data_dir).join("database");
        std::fs::create_dir_all(&path)
            .map_err(|e| AppError::internal(format!("Failed to create data dir: {e}")))?;

        let db = Surreal::new::<RocksDb>(path.to_string_lossy().as_ref())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %path.display(), "Database connection established");

        Ok(Self { db })
    }

    /// Open a fresh in-memory database. Used by tests; every call returns an
    /// isolated, empty store.
    pub async fn connect_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Ok(Self { db })
    }
}
