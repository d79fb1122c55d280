//! Dispatches classified queries and builds the replies.

use crate::catalog::{CatalogReader, NameMatch};
use crate::classifier::classify;
use crate::format::{journal_replies, list_replies};
use crate::messages;
use crate::session::SessionStore;
use catalogbot_types::{DirectionSummary, Query, Reply};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Transport-agnostic request handler.
///
/// Takes the sender and the message text, returns the replies to send in
/// order. Lookup failures are logged and turned into a generic reply; the
/// session store is only written after a successful, non-empty list result.
pub struct QueryHandler {
    catalog: Arc<dyn CatalogReader>,
    sessions: Arc<dyn SessionStore>,
}

impl QueryHandler {
    pub fn new(catalog: Arc<dyn CatalogReader>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub async fn handle(&self, user_id: u64, text: &str) -> Vec<Reply> {
        let query = classify(text);
        debug!(target: "catalogbot::query", user_id, kind = query.kind(), "classified query");

        match query {
            Query::Start => {
                info!(target: "catalogbot::bot", user_id, "user started the bot");
                vec![Reply::markdown(messages::WELCOME)]
            }
            Query::Help => vec![Reply::markdown(messages::HELP)],
            Query::ShowTopUsage => vec![Reply::plain(messages::SHOW_TOP_USAGE)],
            Query::Empty => vec![Reply::plain(messages::EMPTY_QUERY)],
            Query::ShowTop(n) => self.show_top(user_id, n).await,
            Query::Issn(issn) => self.search_by_issn(&issn).await,
            Query::DirectionCode(code) => self.search_by_direction_code(user_id, &code).await,
            Query::FreeText(text) => self.search_by_name(user_id, &text).await,
        }
    }

    async fn search_by_issn(&self, issn: &str) -> Vec<Reply> {
        match self.catalog.by_issn(issn).await {
            Ok(rows) if rows.is_empty() => vec![Reply::plain(messages::ISSN_NOT_FOUND)],
            Ok(rows) => journal_replies(&rows),
            Err(e) => {
                error!(target: "catalogbot::query", issn, "ISSN lookup failed: {}", e);
                vec![Reply::plain(messages::QUERY_FAILED)]
            }
        }
    }

    async fn search_by_direction_code(&self, user_id: u64, code: &str) -> Vec<Reply> {
        match self.catalog.by_direction_code(code).await {
            Ok(rows) if rows.is_empty() => vec![Reply::plain(messages::DIRECTION_CODE_NOT_FOUND)],
            Ok(rows) => self.remember_and_list(user_id, rows).await,
            Err(e) => {
                error!(target: "catalogbot::query", code, "direction code lookup failed: {}", e);
                vec![Reply::plain(messages::QUERY_FAILED)]
            }
        }
    }

    async fn search_by_name(&self, user_id: u64, text: &str) -> Vec<Reply> {
        match self.catalog.by_name(text).await {
            Ok(NameMatch::Journals(rows)) if !rows.is_empty() => journal_replies(&rows),
            Ok(NameMatch::Directions(rows)) if !rows.is_empty() => {
                self.remember_and_list(user_id, rows).await
            }
            Ok(_) => vec![Reply::plain(messages::NAME_NOT_FOUND)],
            Err(e) if e.is_data_access() => {
                error!(target: "catalogbot::query", "name lookup failed: {}", e);
                vec![Reply::plain(messages::QUERY_FAILED)]
            }
            Err(e) => {
                error!(target: "catalogbot::query", "unexpected failure in name lookup: {}", e);
                vec![Reply::plain(messages::UNEXPECTED_FAILURE)]
            }
        }
    }

    async fn remember_and_list(&self, user_id: u64, rows: Vec<DirectionSummary>) -> Vec<Reply> {
        let replies = list_replies(messages::LIST_HEADER, &rows, Some(messages::LIST_FOOTER));
        self.sessions.put(user_id, rows).await;
        replies
    }

    async fn show_top(&self, user_id: u64, n: usize) -> Vec<Reply> {
        let Some(rows) = self.sessions.get(user_id).await else {
            return vec![Reply::plain(messages::NO_PREVIOUS_LIST)];
        };

        let mut replies = Vec::new();
        let mut n = n;
        if n > rows.len() {
            replies.push(Reply::plain(messages::list_shorter_than_requested(rows.len())));
            n = rows.len();
        }

        replies.extend(list_replies(&messages::top_header(n), &rows[..n], None));
        replies
    }
}
