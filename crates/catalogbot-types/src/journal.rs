//! Catalog rows and the records built from them.

use serde::{Deserialize, Serialize};

/// One row of the `directions` table in its full projection.
///
/// Every column is carried as text; the catalog is free to store numbers
/// and dates in whatever column types it likes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRow {
    pub journal_name: Option<String>,
    pub issn: Option<String>,
    pub direction_number: Option<String>,
    pub scientific_directions: Option<String>,
    pub inclusion_date: Option<String>,
    pub h_index: Option<String>,
    pub citation_index: Option<String>,
    pub publication_time: Option<String>,
    pub publication_price: Option<String>,
    pub white_list_level: Option<String>,
    pub url: Option<String>,
    pub final_category: Option<String>,
}

/// Light projection used by list-mode results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSummary {
    pub journal_name: Option<String>,
    pub issn: Option<String>,
    pub publication_price: Option<String>,
    pub final_category: Option<String>,
}

/// A classification code attached to a journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionEntry {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// A journal with all of its directions merged in.
///
/// Scalar fields come from the first row seen for the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub name: Option<String>,
    pub issn: Option<String>,
    pub directions: Vec<DirectionEntry>,
    pub inclusion_date: Option<String>,
    pub h_index: Option<String>,
    pub citation_index: Option<String>,
    pub publication_time: Option<String>,
    pub publication_price: Option<String>,
    pub white_list_level: Option<String>,
    pub url: Option<String>,
    pub final_category: Option<String>,
}

impl JournalRecord {
    fn from_row(row: &JournalRow) -> Self {
        Self {
            name: row.journal_name.clone(),
            issn: row.issn.clone(),
            directions: Vec::new(),
            inclusion_date: row.inclusion_date.clone(),
            h_index: row.h_index.clone(),
            citation_index: row.citation_index.clone(),
            publication_time: row.publication_time.clone(),
            publication_price: row.publication_price.clone(),
            white_list_level: row.white_list_level.clone(),
            url: row.url.clone(),
            final_category: row.final_category.clone(),
        }
    }

    /// Group rows by journal name, keeping first-seen order.
    pub fn group(rows: &[JournalRow]) -> Vec<JournalRecord> {
        let mut records: Vec<JournalRecord> = Vec::new();
        for row in rows {
            let idx = match records.iter().position(|r| r.name == row.journal_name) {
                Some(idx) => idx,
                None => {
                    records.push(Self::from_row(row));
                    records.len() - 1
                }
            };
            records[idx].directions.push(DirectionEntry {
                code: row.direction_number.clone(),
                description: row.scientific_directions.clone(),
            });
        }
        records
    }
}
