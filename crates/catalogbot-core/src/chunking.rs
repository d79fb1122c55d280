//! Splitting long replies into transport-sized messages.

/// Telegram's hard limit on message text length.
pub const MESSAGE_LIMIT: usize = 4096;

/// Length as Telegram counts it, in UTF-16 code units.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Split `text` into chunks of at most `limit` UTF-16 units.
///
/// A chunk ends after the last newline inside the window when there is one,
/// otherwise the window is cut at the limit. A hard cut never separates a
/// MarkdownV2 `\` from the character it escapes. The newline stays with
/// the earlier chunk, so concatenating the chunks yields `text` again.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while text_len(rest) > limit {
        let window_end = window_end(rest, limit);
        let split = match rest[..window_end].rfind('\n') {
            Some(idx) if idx > 0 => idx + 1,
            _ => keep_escape_pairs(&rest[..window_end]),
        };
        let (chunk, tail) = rest.split_at(split);
        chunks.push(chunk.to_string());
        rest = tail;
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Byte offset of the longest prefix that fits in `limit` units.
/// Always covers at least one char so the split makes progress.
fn window_end(text: &str, limit: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > limit {
            return if idx == 0 { ch.len_utf8() } else { idx };
        }
    }
    text.len()
}

/// Byte offset to cut `window` at so it does not end in a dangling escape.
fn keep_escape_pairs(window: &str) -> usize {
    let trailing = window.bytes().rev().take_while(|&b| b == b'\\').count();
    if trailing % 2 == 1 && window.len() > 1 {
        window.len() - 1
    } else {
        window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_message("hello", 10), vec!["hello"]);
        assert!(split_message("", 10).is_empty());
    }

    #[test]
    fn test_splits_at_last_newline_in_window() {
        let chunks = split_message("aaa\nbbb\nccc", 9);
        assert_eq!(chunks, vec!["aaa\nbbb\n", "ccc"]);
    }

    #[test]
    fn test_hard_split_without_newline() {
        let chunks = split_message("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_leading_newline_is_not_a_split_point() {
        let chunks = split_message("\nabcdef", 4);
        assert_eq!(chunks, vec!["\nabc", "def"]);
    }

    #[test]
    fn test_counts_utf16_units() {
        // Each emoji is a surrogate pair: two units.
        assert_eq!(text_len("📚"), 2);
        assert_eq!(text_len("Журнал"), 6);
        let chunks = split_message("📚📚📚", 4);
        assert_eq!(chunks, vec!["📚📚", "📚"]);
    }

    #[test]
    fn test_long_list_splits_on_line_boundaries() {
        let line = "строка каталога\n";
        let text = line.repeat(600);
        let chunks = split_message(&text, MESSAGE_LIMIT);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(text_len(chunk) <= MESSAGE_LIMIT);
            assert!(chunk.ends_with('\n'));
        }
    }

    fn ends_with_odd_backslashes(chunk: &str) -> bool {
        chunk.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
    }

    #[test]
    fn test_hard_split_keeps_escape_pairs() {
        // "a\." repeated; cutting at 4 would leave a lone backslash.
        let text = r"bb".to_string() + &r"a\.".repeat(10);
        let chunks = split_message(&text, 4);
        assert_eq!(chunks.concat(), text);
        for chunk in &chunks {
            assert!(text_len(chunk) <= 4);
            assert!(!ends_with_odd_backslashes(chunk), "{:?}", chunks);
            assert!(!chunk.starts_with('.'), "{:?}", chunks);
        }
    }

    #[test]
    fn test_escaped_backslash_pair_is_not_split() {
        let chunks = split_message(r"ab\\cd", 3);
        assert_eq!(chunks.concat(), r"ab\\cd");
        assert!(chunks.iter().all(|c| !ends_with_odd_backslashes(c)));
    }

    proptest! {
        #[test]
        fn prop_chunks_reconstruct_input(text in "(\\PC{0,40}\n?){0,60}", limit in 2usize..200) {
            let chunks = split_message(&text, limit);
            prop_assert_eq!(chunks.concat(), text);
        }

        #[test]
        fn prop_chunks_fit_limit(text in "[a-zя📚 \n]{0,500}", limit in 2usize..120) {
            for chunk in split_message(&text, limit) {
                prop_assert!(text_len(&chunk) <= limit);
                prop_assert!(!chunk.is_empty());
            }
        }

        #[test]
        fn prop_hard_splits_keep_escape_pairs(raw in "[a.\\-]{0,300}", limit in 2usize..60) {
            let text = crate::format::escape_markdown(&raw);
            let chunks = split_message(&text, limit);
            prop_assert_eq!(chunks.concat(), text);
            for chunk in &chunks {
                prop_assert!(!ends_with_odd_backslashes(chunk));
            }
        }
    }
}
