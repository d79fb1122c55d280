//! Error types for catalog access.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Postgres error: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Catalog task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CatalogError {
    /// Whether the failure came from the database driver rather than the runtime.
    pub fn is_data_access(&self) -> bool {
        matches!(self, CatalogError::Postgres(_) | CatalogError::Sqlite(_))
    }
}
