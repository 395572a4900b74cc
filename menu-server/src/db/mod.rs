//! Database Module
//!
//! Opens the embedded SurrealDB instance backing [`store::SurrealStore`]

pub mod store;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "menu";
const DATABASE: &str = "menu";

/// Database service - owns an embedded SurrealDB connection
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) a RocksDB-backed database at `db_path`
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self::select(db).await?;
        tracing::info!(path = %db_path.display(), "Database connection established (SurrealDB RocksDB)");
        Ok(service)
    }

    /// In-process database that lives as long as the connection
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        let service = Self::select(db).await?;
        tracing::info!("Database connection established (SurrealDB in-memory)");
        Ok(service)
    }

    async fn select(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}
