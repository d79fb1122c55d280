//! SQLite catalog backend for local and offline deployments.

use super::{CatalogReader, NameMatch};
use crate::Result;
use async_trait::async_trait;
use catalogbot_types::{DirectionSummary, JournalRow};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

const BY_ISSN_SQL: &str = r#"
    SELECT journal_name, issn, direction_number, scientific_directions,
           inclusion_date, h_index, citation_index, publication_time,
           publication_price, white_list_level, url, final_category
    FROM directions
    WHERE issn = ?1
"#;

const BY_NAME_SQL: &str = r#"
    SELECT journal_name, issn, direction_number, scientific_directions,
           inclusion_date, h_index, citation_index, publication_time,
           publication_price, white_list_level, url, final_category
    FROM directions
    WHERE casefold(journal_name) LIKE casefold(?1)
"#;

const BY_DIRECTION_CODE_SQL: &str = r#"
    SELECT journal_name, issn, publication_price, final_category
    FROM directions
    WHERE direction_number = ?1
"#;

const BY_DIRECTION_TEXT_SQL: &str = r#"
    SELECT journal_name, issn, publication_price, final_category
    FROM directions
    WHERE casefold(scientific_directions) LIKE '%' || casefold(?1) || '%'
"#;

/// Catalog stored in an SQLite file with a `directions` table.
///
/// A read-only connection is opened for every lookup on the blocking pool
/// and dropped when the lookup returns.
pub struct SqliteCatalog {
    path: PathBuf,
}

impl SqliteCatalog {
    /// Open the catalog at `path`, checking that the `directions` table is readable.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = connect(path)?;
        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM directions", [], |row| row.get(0))?;
        debug!(target: "catalogbot::startup", path = %path.display(), rows, "opened SQLite catalog");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        let result = tokio::task::spawn_blocking(move || {
            let conn = connect(&path)?;
            f(&conn)
        })
        .await?;
        Ok(result?)
    }
}

#[async_trait]
impl CatalogReader for SqliteCatalog {
    async fn by_issn(&self, issn: &str) -> Result<Vec<JournalRow>> {
        let issn = issn.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(BY_ISSN_SQL)?;
            let rows = stmt
                .query_map(params![issn], journal_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await
    }

    async fn by_direction_code(&self, code: &str) -> Result<Vec<DirectionSummary>> {
        let code = code.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(BY_DIRECTION_CODE_SQL)?;
            let rows = stmt
                .query_map(params![code], summary_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await
    }

    async fn by_name(&self, text: &str) -> Result<NameMatch> {
        let text = text.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(BY_NAME_SQL)?;
            let journals = stmt
                .query_map(params![text], journal_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            if !journals.is_empty() {
                return Ok(NameMatch::Journals(journals));
            }

            let mut stmt = conn.prepare(BY_DIRECTION_TEXT_SQL)?;
            let summaries = stmt
                .query_map(params![text], summary_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(NameMatch::Directions(summaries))
        })
        .await
    }
}

fn connect(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    // SQLite's own lower() and LIKE only fold ASCII.
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Value = ctx.get(0)?;
            Ok(value_to_text(value).map(|s| s.to_lowercase()))
        },
    )?;
    Ok(conn)
}

/// Render any SQLite storage class as text; NULL stays absent.
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}

fn text(row: &rusqlite::Row, column: &str) -> rusqlite::Result<Option<String>> {
    Ok(value_to_text(row.get(column)?))
}

fn journal_row(row: &rusqlite::Row) -> rusqlite::Result<JournalRow> {
    Ok(JournalRow {
        journal_name: text(row, "journal_name")?,
        issn: text(row, "issn")?,
        direction_number: text(row, "direction_number")?,
        scientific_directions: text(row, "scientific_directions")?,
        inclusion_date: text(row, "inclusion_date")?,
        h_index: text(row, "h_index")?,
        citation_index: text(row, "citation_index")?,
        publication_time: text(row, "publication_time")?,
        publication_price: text(row, "publication_price")?,
        white_list_level: text(row, "white_list_level")?,
        url: text(row, "url")?,
        final_category: text(row, "final_category")?,
    })
}

fn summary_row(row: &rusqlite::Row) -> rusqlite::Result<DirectionSummary> {
    Ok(DirectionSummary {
        journal_name: text(row, "journal_name")?,
        issn: text(row, "issn")?,
        publication_price: text(row, "publication_price")?,
        final_category: text(row, "final_category")?,
    })
}
