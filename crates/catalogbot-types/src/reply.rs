//! Outbound chat messages.

use serde::{Deserialize, Serialize};

/// Markup mode an outbound message is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Markup {
    /// Sent verbatim.
    Plain,
    /// Telegram MarkdownV2; all interpolated text is escaped.
    MarkdownV2,
}

/// A single message to send back in reply to the inbound one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub markup: Markup,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::Plain,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::MarkdownV2,
        }
    }
}
