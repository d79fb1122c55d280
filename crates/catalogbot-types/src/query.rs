//! Classified inbound requests.

use serde::{Deserialize, Serialize};

/// What an inbound text message asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Query {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// `/show_top N` with a valid positive count.
    ShowTop(usize),
    /// `/show_top` with a missing or malformed count.
    ShowTopUsage,
    /// ISSN lookup, e.g. `1234-5678`.
    Issn(String),
    /// Classification code lookup, e.g. `5.3.3`.
    DirectionCode(String),
    /// Journal name, falling back to a direction description search.
    FreeText(String),
    /// Nothing but whitespace.
    Empty,
}

impl Query {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Start => "start",
            Query::Help => "help",
            Query::ShowTop(_) => "show_top",
            Query::ShowTopUsage => "show_top_usage",
            Query::Issn(_) => "issn",
            Query::DirectionCode(_) => "direction_code",
            Query::FreeText(_) => "free_text",
            Query::Empty => "empty",
        }
    }
}
