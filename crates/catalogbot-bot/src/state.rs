//! Shared application state.

use crate::config::{Backend, Config};
use anyhow::{Context, Result};
use catalogbot_core::{CatalogReader, MemorySessionStore, PostgresCatalog, QueryHandler, SqliteCatalog};
use std::sync::Arc;

/// Shared application state, handed to every update handler.
pub struct AppState {
    pub handler: QueryHandler,
    pub sessions: Arc<MemorySessionStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let catalog = open_catalog(config)?;
        let sessions = Arc::new(MemorySessionStore::new());
        let handler = QueryHandler::new(catalog, sessions.clone());
        Ok(Self { handler, sessions })
    }
}

fn open_catalog(config: &Config) -> Result<Arc<dyn CatalogReader>> {
    let db = &config.database;
    match db.backend {
        Backend::Postgres => {
            tracing::info!(
                target: "catalogbot::startup",
                "Using Postgres catalog at {}:{}/{}",
                db.host,
                db.port,
                db.name
            );
            Ok(Arc::new(PostgresCatalog::connect_lazy(&db.postgres_settings()?)))
        }
        Backend::Sqlite => {
            let path = db
                .path
                .as_deref()
                .context("SQLite catalog needs a path (set DB_PATH or database.path)")?;
            let catalog = SqliteCatalog::open(path)
                .with_context(|| format!("Failed to open SQLite catalog {}", path.display()))?;
            tracing::info!(target: "catalogbot::startup", "Using SQLite catalog at {}", path.display());
            Ok(Arc::new(catalog))
        }
    }
}
