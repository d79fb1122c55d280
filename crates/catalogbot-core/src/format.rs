//! Rendering catalog rows as MarkdownV2 chat messages.
//!
//! Detailed mode renders one block per journal with all of its directions.
//! List mode renders one numbered entry per summary row. Every piece of
//! catalog or user text is escaped in both modes.

use crate::chunking::{split_message, text_len, MESSAGE_LIMIT};
use catalogbot_types::{DirectionSummary, JournalRecord, JournalRow, Reply};

/// Once a list buffer grows past this many units it is sent and a new one
/// started, leaving headroom under [`MESSAGE_LIMIT`] for the trailing hint.
pub(crate) const LIST_SOFT_LIMIT: usize = 3500;

const NOT_SPECIFIED: &str = "Не указано";
const NAME_NOT_SPECIFIED: &str = "Название не указано";

/// Escape MarkdownV2 reserved characters, including the escape marker itself.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|'
                | '{' | '}' | '.' | '!' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Treats empty strings as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn or_text(value: &Option<String>, placeholder: &str) -> String {
    escape_markdown(present(value).unwrap_or(placeholder))
}

fn or_zero(value: &Option<String>) -> String {
    or_text(value, "0")
}

/// Render one journal block.
pub(crate) fn render_journal(record: &JournalRecord) -> String {
    let directions = record
        .directions
        .iter()
        .map(|d| {
            format!(
                "• {} — {}",
                or_text(&d.code, NOT_SPECIFIED),
                or_text(&d.description, NOT_SPECIFIED)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "📚 *Название журнала:* {}\n\
         🔢 *ISSN:* {}\n\
         📖 *Направления:*\n{}\n\
         📅 *Дата включения:* {}\n\
         📈 *Индекс Хирша:* {}\n\
         🔗 *Индекс цитирования:* {}\n\
         ⏳ *Время публикации:* {}\n\
         💰 *Цена публикации:* {}\n\
         🏅 *Уровень в «Белом списке»:* {}\n\
         🔖 *Итоговая категория:* {}\n\
         🌐 *Ссылка:* {}",
        or_text(&record.name, NAME_NOT_SPECIFIED),
        or_text(&record.issn, NOT_SPECIFIED),
        directions,
        or_text(&record.inclusion_date, NOT_SPECIFIED),
        or_zero(&record.h_index),
        or_zero(&record.citation_index),
        or_text(&record.publication_time, NOT_SPECIFIED),
        or_zero(&record.publication_price),
        or_text(&record.white_list_level, NOT_SPECIFIED),
        or_text(&record.final_category, NOT_SPECIFIED),
        or_text(&record.url, NOT_SPECIFIED),
    )
}

/// Render one numbered list entry, terminated by a blank line.
pub(crate) fn render_list_entry(index: usize, summary: &DirectionSummary) -> String {
    format!(
        "{}\\. 📰 *{}*\n   🔢 *ISSN:* {}\n   💰 *Цена:* {}\n   🏷️ *Категория:* {}\n\n",
        index,
        or_text(&summary.journal_name, NAME_NOT_SPECIFIED),
        or_text(&summary.issn, NOT_SPECIFIED),
        or_zero(&summary.publication_price),
        or_text(&summary.final_category, "-"),
    )
}

/// One reply per distinct journal, split further if a block is oversized.
pub fn journal_replies(rows: &[JournalRow]) -> Vec<Reply> {
    JournalRecord::group(rows)
        .iter()
        .flat_map(|record| split_message(&render_journal(record), MESSAGE_LIMIT))
        .map(Reply::markdown)
        .collect()
}

/// Numbered list under `header`, flushed every time the buffer passes
/// `LIST_SOFT_LIMIT`, with `footer` appended to the last message.
pub fn list_replies(
    header: &str,
    entries: &[DirectionSummary],
    footer: Option<&str>,
) -> Vec<Reply> {
    let mut blocks = Vec::new();
    let mut buffer = header.to_string();

    for (i, summary) in entries.iter().enumerate() {
        buffer.push_str(&render_list_entry(i + 1, summary));
        if text_len(&buffer) > LIST_SOFT_LIMIT {
            blocks.push(std::mem::take(&mut buffer));
        }
    }

    if let Some(footer) = footer {
        if buffer.is_empty() {
            buffer.push_str(footer.trim_start());
        } else {
            buffer.push_str(footer);
        }
    }
    if !buffer.is_empty() {
        blocks.push(buffer);
    }

    blocks
        .iter()
        .flat_map(|block| split_message(block, MESSAGE_LIMIT))
        .map(Reply::markdown)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogbot_types::Markup;
    use proptest::prelude::*;

    const RESERVED: &str = "_*[]()~`>#+-=|{}.!";

    fn summary(name: &str) -> DirectionSummary {
        DirectionSummary {
            journal_name: Some(name.to_string()),
            issn: Some("1234-5678".to_string()),
            publication_price: None,
            final_category: None,
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("1234-5678"), r"1234\-5678");
        assert_eq!(escape_markdown("Вестник (серия А)."), r"Вестник \(серия А\)\.");
        assert_eq!(escape_markdown(r"a\b"), r"a\\b");
        assert_eq!(escape_markdown(""), "");
    }

    #[test]
    fn test_journal_block_lists_all_directions() {
        let base = JournalRow {
            journal_name: Some("Вестник".into()),
            issn: Some("1234-5678".into()),
            direction_number: Some("5.3.3".into()),
            scientific_directions: Some("Психология труда".into()),
            ..Default::default()
        };
        let second = JournalRow {
            direction_number: Some("5.8.1".into()),
            scientific_directions: Some("Общая педагогика".into()),
            ..base.clone()
        };

        let replies = journal_replies(&[base, second]);
        assert_eq!(replies.len(), 1);
        let text = &replies[0].text;
        assert_eq!(replies[0].markup, Markup::MarkdownV2);
        assert!(text.contains(r"• 5\.3\.3 — Психология труда"));
        assert!(text.contains(r"• 5\.8\.1 — Общая педагогика"));
        assert!(text.contains(r"🔢 *ISSN:* 1234\-5678"));
    }

    #[test]
    fn test_journal_block_placeholders() {
        let row = JournalRow {
            journal_name: Some("Вестник".into()),
            publication_time: Some("".into()),
            ..Default::default()
        };
        let text = render_journal(&JournalRecord::group(&[row])[0]);
        assert!(text.contains("📈 *Индекс Хирша:* 0\n"));
        assert!(text.contains("🔗 *Индекс цитирования:* 0\n"));
        assert!(text.contains("💰 *Цена публикации:* 0\n"));
        assert!(text.contains("⏳ *Время публикации:* Не указано\n"));
        assert!(text.contains("🔖 *Итоговая категория:* Не указано\n"));
        assert!(text.contains("• Не указано — Не указано"));
    }

    #[test]
    fn test_list_entry_placeholders() {
        let entry = render_list_entry(3, &DirectionSummary::default());
        assert_eq!(
            entry,
            "3\\. 📰 *Название не указано*\n   🔢 *ISSN:* Не указано\n   💰 *Цена:* 0\n   🏷️ *Категория:* \\-\n\n"
        );
    }

    #[test]
    fn test_oversized_line_splits_between_escape_pairs() {
        let row = JournalRow {
            journal_name: Some("Вестник".into()),
            scientific_directions: Some(format!("bb{}", "a.".repeat(2100))),
            ..Default::default()
        };
        let replies = journal_replies(&[row]);
        assert!(replies.len() >= 3);
        for reply in &replies {
            let text = &reply.text;
            let trailing = text.chars().rev().take_while(|&c| c == '\\').count();
            assert!(text_len(text) <= MESSAGE_LIMIT);
            assert_eq!(trailing % 2, 0, "dangling escape at end of chunk");
            assert!(!text.starts_with('.'), "unescaped dot at start of chunk");
        }
    }

    #[test]
    fn test_short_list_is_one_message_with_footer() {
        let entries = vec![summary("A"), summary("B"), summary("C")];
        let replies = list_replies("H\n\n", &entries, Some("\nF"));
        assert_eq!(replies.len(), 1);
        let text = &replies[0].text;
        assert!(text.starts_with("H\n\n1\\. 📰 *A*"));
        assert!(text.contains("3\\. 📰 *C*"));
        assert!(text.ends_with("\nF"));
    }

    #[test]
    fn test_long_list_flushes_at_soft_limit() {
        let entries: Vec<_> = (0..120).map(|i| summary(&format!("Журнал {}", i))).collect();
        let replies = list_replies("H\n\n", &entries, Some("\nF"));
        assert!(replies.len() >= 2);
        for reply in &replies {
            assert!(text_len(&reply.text) <= MESSAGE_LIMIT);
        }
        for reply in &replies[..replies.len() - 1] {
            assert!(text_len(&reply.text) > LIST_SOFT_LIMIT);
        }
        // numbering continues across messages
        let all: String = replies.iter().map(|r| r.text.as_str()).collect();
        assert!(all.contains("120\\. 📰 *Журнал 119*"));
        assert!(replies.last().unwrap().text.ends_with('F'));
    }

    proptest! {
        #[test]
        fn prop_reserved_chars_escaped_once(text in "[a-zа-я _*\\[\\]()~`>#+\\-=|{}.!]{0,60}") {
            let escaped = escape_markdown(&text);
            let chars: Vec<char> = escaped.chars().collect();
            let mut i = 0;
            while i < chars.len() {
                if RESERVED.contains(chars[i]) {
                    prop_assert!(false, "unescaped {:?} in {:?}", chars[i], escaped);
                }
                if chars[i] == '\\' {
                    prop_assert!(i + 1 < chars.len());
                    prop_assert!(RESERVED.contains(chars[i + 1]));
                    i += 2;
                } else {
                    i += 1;
                }
            }
            let unescaped: String = escaped.replace('\\', "");
            prop_assert_eq!(unescaped, text);
        }
    }
}
