//! PostgreSQL catalog backend.

use super::{CatalogReader, NameMatch};
use crate::Result;
use async_trait::async_trait;
use catalogbot_types::{DirectionSummary, JournalRow};
use sqlx::Row;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow, PgSslMode};
use std::time::Duration;
use tracing::debug;

// Every column is cast to text so the reader does not care whether the
// catalog stores h-index as integer, price as numeric or dates as date.
const BY_ISSN_SQL: &str = r#"
    SELECT journal_name::text AS journal_name, issn::text AS issn,
           direction_number::text AS direction_number,
           scientific_directions::text AS scientific_directions,
           inclusion_date::text AS inclusion_date, h_index::text AS h_index,
           citation_index::text AS citation_index,
           publication_time::text AS publication_time,
           publication_price::text AS publication_price,
           white_list_level::text AS white_list_level, url::text AS url,
           final_category::text AS final_category
    FROM directions
    WHERE issn = $1
"#;

const BY_NAME_SQL: &str = r#"
    SELECT journal_name::text AS journal_name, issn::text AS issn,
           direction_number::text AS direction_number,
           scientific_directions::text AS scientific_directions,
           inclusion_date::text AS inclusion_date, h_index::text AS h_index,
           citation_index::text AS citation_index,
           publication_time::text AS publication_time,
           publication_price::text AS publication_price,
           white_list_level::text AS white_list_level, url::text AS url,
           final_category::text AS final_category
    FROM directions
    WHERE journal_name ILIKE $1
"#;

const BY_DIRECTION_CODE_SQL: &str = r#"
    SELECT journal_name::text AS journal_name, issn::text AS issn,
           publication_price::text AS publication_price,
           final_category::text AS final_category
    FROM directions
    WHERE direction_number = $1
"#;

const BY_DIRECTION_TEXT_SQL: &str = r#"
    SELECT journal_name::text AS journal_name, issn::text AS issn,
           publication_price::text AS publication_price,
           final_category::text AS final_category
    FROM directions
    WHERE scientific_directions ILIKE '%' || $1 || '%'
"#;

/// Connection parameters for the catalog database.
#[derive(Debug, Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// TLS negotiation; `Prefer` upgrades whenever the server offers it.
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

/// Catalog backed by a PostgreSQL connection pool.
///
/// Each lookup acquires one pooled connection and hands it back when the
/// guard drops, on success and on error alike.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Build a pool that connects on first use.
    pub fn connect_lazy(settings: &PostgresSettings) -> Self {
        let options = PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.database)
            .ssl_mode(settings.ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_lazy_with(options);

        Self { pool }
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalog {
    async fn by_issn(&self, issn: &str) -> Result<Vec<JournalRow>> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(BY_ISSN_SQL)
            .bind(issn)
            .fetch_all(&mut *conn)
            .await?;
        debug!(target: "catalogbot::query", issn, rows = rows.len(), "ISSN lookup");
        Ok(rows.iter().map(journal_row).collect::<sqlx::Result<_>>()?)
    }

    async fn by_direction_code(&self, code: &str) -> Result<Vec<DirectionSummary>> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(BY_DIRECTION_CODE_SQL)
            .bind(code)
            .fetch_all(&mut *conn)
            .await?;
        debug!(target: "catalogbot::query", code, rows = rows.len(), "direction code lookup");
        Ok(rows.iter().map(summary_row).collect::<sqlx::Result<_>>()?)
    }

    async fn by_name(&self, text: &str) -> Result<NameMatch> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(BY_NAME_SQL)
            .bind(text)
            .fetch_all(&mut *conn)
            .await?;
        if !rows.is_empty() {
            debug!(target: "catalogbot::query", rows = rows.len(), "journal name match");
            let journals = rows.iter().map(journal_row).collect::<sqlx::Result<_>>()?;
            return Ok(NameMatch::Journals(journals));
        }

        let rows = sqlx::query(BY_DIRECTION_TEXT_SQL)
            .bind(text)
            .fetch_all(&mut *conn)
            .await?;
        debug!(target: "catalogbot::query", rows = rows.len(), "direction text match");
        let summaries = rows.iter().map(summary_row).collect::<sqlx::Result<_>>()?;
        Ok(NameMatch::Directions(summaries))
    }
}

fn journal_row(row: &PgRow) -> sqlx::Result<JournalRow> {
    Ok(JournalRow {
        journal_name: row.try_get("journal_name")?,
        issn: row.try_get("issn")?,
        direction_number: row.try_get("direction_number")?,
        scientific_directions: row.try_get("scientific_directions")?,
        inclusion_date: row.try_get("inclusion_date")?,
        h_index: row.try_get("h_index")?,
        citation_index: row.try_get("citation_index")?,
        publication_time: row.try_get("publication_time")?,
        publication_price: row.try_get("publication_price")?,
        white_list_level: row.try_get("white_list_level")?,
        url: row.try_get("url")?,
        final_category: row.try_get("final_category")?,
    })
}

fn summary_row(row: &PgRow) -> sqlx::Result<DirectionSummary> {
    Ok(DirectionSummary {
        journal_name: row.try_get("journal_name")?,
        issn: row.try_get("issn")?,
        publication_price: row.try_get("publication_price")?,
        final_category: row.try_get("final_category")?,
    })
}
