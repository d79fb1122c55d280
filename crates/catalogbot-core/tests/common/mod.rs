//! Common test utilities for integration tests.

use async_trait::async_trait;
use catalogbot_core::{CatalogReader, NameMatch, Result, SqliteCatalog};
use catalogbot_types::{DirectionSummary, JournalRow};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Build an SQLite catalog from `tests/fixtures/catalog.sql` in a temp dir.
/// Keep the returned `TempDir` alive for as long as the catalog is used.
pub fn fixture_catalog() -> (SqliteCatalog, TempDir) {
    let sql_path = fixture_path("catalog.sql");
    let sql = std::fs::read_to_string(&sql_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", sql_path.display(), e));

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("catalog.db");
    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch(&sql)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", sql_path.display(), e));
    drop(conn);

    (SqliteCatalog::open(&db_path).unwrap(), temp_dir)
}

/// Catalog double that records every lookup it receives.
#[derive(Default)]
pub struct RecordingCatalog {
    pub calls: Mutex<Vec<String>>,
    pub summaries: Vec<DirectionSummary>,
}

impl RecordingCatalog {
    pub fn with_summaries(summaries: Vec<DirectionSummary>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            summaries,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogReader for RecordingCatalog {
    async fn by_issn(&self, issn: &str) -> Result<Vec<JournalRow>> {
        self.calls.lock().unwrap().push(format!("issn:{}", issn));
        Ok(vec![])
    }

    async fn by_direction_code(&self, code: &str) -> Result<Vec<DirectionSummary>> {
        self.calls.lock().unwrap().push(format!("code:{}", code));
        Ok(self.summaries.clone())
    }

    async fn by_name(&self, text: &str) -> Result<NameMatch> {
        self.calls.lock().unwrap().push(format!("name:{}", text));
        Ok(NameMatch::Directions(self.summaries.clone()))
    }
}
