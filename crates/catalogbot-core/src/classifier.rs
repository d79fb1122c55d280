//! Turns inbound text into a [`Query`].

use catalogbot_types::Query;
use once_cell::sync::Lazy;
use regex::Regex;

/// `1234-5678`, check digit may be `X`. `\d` is any Unicode digit.
static ISSN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{3}[0-9X]$").expect("Invalid ISSN regex"));

/// Dotted direction code, e.g. `5.3.3` or `12.00.01`.
static DIRECTION_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+$").expect("Invalid direction code regex")
});

/// Classify a raw message text.
///
/// Commands are recognised by their first token, with an optional
/// `@botname` suffix as Telegram sends in group chats. Anything that is not
/// a known command goes through the ISSN / direction code / free text
/// patterns.
pub fn classify(text: &str) -> Query {
    let text = text.trim();
    if text.is_empty() {
        return Query::Empty;
    }

    let mut tokens = text.split_whitespace();
    if let Some(command) = tokens.next().and_then(command_name) {
        match command {
            "start" => return Query::Start,
            "help" => return Query::Help,
            "show_top" => {
                return match tokens.next().and_then(|arg| arg.parse::<usize>().ok()) {
                    Some(n) if n > 0 => Query::ShowTop(n),
                    _ => Query::ShowTopUsage,
                };
            }
            _ => {}
        }
    }

    if ISSN_REGEX.is_match(text) {
        Query::Issn(text.to_string())
    } else if DIRECTION_CODE_REGEX.is_match(text) {
        Query::DirectionCode(text.to_string())
    } else {
        Query::FreeText(text.to_string())
    }
}

/// `/name` or `/name@bot` -> `name`.
fn command_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix('/')?;
    let name = name.split_once('@').map_or(name, |(name, _)| name);
    Some(name)
}
