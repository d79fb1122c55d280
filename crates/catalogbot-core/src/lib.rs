//! Query classification, catalog access and reply rendering for the journal catalog bot.

mod catalog;
mod chunking;
mod classifier;
mod error;
mod format;
mod handler;
mod messages;
mod session;

pub use catalog::{
    CatalogReader, NameMatch, PgSslMode, PostgresCatalog, PostgresSettings, SqliteCatalog,
};
pub use chunking::{split_message, text_len, MESSAGE_LIMIT};
pub use classifier::classify;
pub use error::CatalogError;
pub use format::{escape_markdown, journal_replies, list_replies};
pub use handler::QueryHandler;
pub use session::{MemorySessionStore, SessionStore};

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
