//! Tìm kiếm nguyên văn không phân biệt hoa thường và markup đánh dấu.

use std::ops::Range;

use crate::entry::Entry;
use crate::html::escape_html;

pub const HIGHLIGHT_CLASS: &str = "highlight";

/// `true` khi tiêu đề, nội dung (dạng text) hoặc nhãn ngày chứa `query`.
///
/// Từ khoá rỗng khớp với mọi entry.
pub fn entry_matches(entry: &Entry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    contains_folded(&entry.title, query)
        || contains_folded(&plain_text(&entry.body), query)
        || contains_folded(&entry.date_range, query)
}

pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || !find_folded(haystack, needle).is_empty()
}

/// Khoảng byte của các lần xuất hiện không chồng nhau của `needle`, không phân biệt hoa thường.
pub fn find_folded(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let folded: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    let mut found = Vec::new();
    if folded.is_empty() {
        return found;
    }

    let mut cursor = 0;
    while cursor < haystack.len() {
        match match_at(&haystack[cursor..], &folded) {
            Some(len) => {
                found.push(cursor..cursor + len);
                cursor += len;
            }
            None => {
                cursor += haystack[cursor..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
            }
        }
    }
    found
}

/// Độ dài (byte) của tiền tố `text` mà sau khi fold bằng đúng `folded`.
fn match_at(text: &str, folded: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            if folded.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == folded.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}

/// Bọc mọi lần xuất hiện của `query` trong `text` bằng thẻ highlight.
///
/// `text` là text thuần; mọi thứ ngoài thẻ đánh dấu đều được escape.
pub fn highlight(text: &str, query: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in find_folded(text, query) {
        out.push_str(&escape_html(&text[last..range.start]));
        out.push_str("<span class=\"");
        out.push_str(HIGHLIGHT_CLASS);
        out.push_str("\">");
        out.push_str(&escape_html(&text[range.clone()]));
        out.push_str("</span>");
        last = range.end;
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Nội dung text của markup inline: bỏ thẻ, giải mã các entity thông dụng.
pub fn plain_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    out.push_str(rest);
    decode_entities(&out)
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_is_case_insensitive_and_keeps_source_casing() {
        assert_eq!(
            highlight("Haru Urara and URARA", "urara"),
            "Haru <span class=\"highlight\">Urara</span> and <span class=\"highlight\">URARA</span>"
        );
    }

    #[test]
    fn highlight_escapes_text_around_markers() {
        assert_eq!(
            highlight("a < b & c", "b"),
            "a &lt; <span class=\"highlight\">b</span> &amp; c"
        );
    }

    #[test]
    fn query_is_literal_not_a_pattern() {
        assert!(find_folded("price (2x)", "(2x)").len() == 1);
        assert!(find_folded("abc", ".*").is_empty());
    }

    #[test]
    fn plain_text_drops_tags() {
        assert_eq!(
            plain_text("Gives <span style=\"color: red;\">On Your Left</span> &amp; more"),
            "Gives On Your Left & more"
        );
    }

    #[test]
    fn markup_attributes_do_not_match() {
        let entry = Entry::default().with_body("<span style=\"color: red;\">x</span>");
        assert!(!entry_matches(&entry, "color"));
        assert!(entry_matches(&entry, "X"));
    }

    #[test]
    fn multibyte_text_is_searched_on_char_boundaries() {
        assert_eq!(find_folded("Ünïcode ünï", "ÜNÏ"), vec![0..5, 10..15]);
    }
}
