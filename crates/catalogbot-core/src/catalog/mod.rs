//! Read-only access to the `directions` table.

mod postgres;
mod sqlite;

pub use postgres::{PostgresCatalog, PostgresSettings};
pub use sqlx::postgres::PgSslMode;
pub use sqlite::SqliteCatalog;

use crate::Result;
use async_trait::async_trait;
use catalogbot_types::{DirectionSummary, JournalRow};

/// Outcome of a name lookup.
///
/// A journal name match wins; the direction description search only runs
/// when no journal name matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Journals(Vec<JournalRow>),
    Directions(Vec<DirectionSummary>),
}

/// The three lookups the bot performs against the catalog.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Exact match on `issn`, full projection.
    async fn by_issn(&self, issn: &str) -> Result<Vec<JournalRow>>;

    /// Exact match on `direction_number`, summary projection.
    async fn by_direction_code(&self, code: &str) -> Result<Vec<DirectionSummary>>;

    /// Case-insensitive pattern match on `journal_name`, falling back to a
    /// case-insensitive substring match on `scientific_directions`.
    async fn by_name(&self, text: &str) -> Result<NameMatch>;
}
