//! Text helpers: escaping, whitespace, word counts, reading time

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Trim and collapse every whitespace run to a single space
pub fn collapse_whitespace(text: &str) -> String {
    SPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Escape text for inclusion in HTML
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Count words in plain text.
///
/// Alphabetic scripts count runs of alphanumerics; each CJK ideograph counts as one word.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if ('\u{4E00}'..='\u{9FFF}').contains(&c) {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if c == '\'' || c == '’' {
            // contractions stay one word
        } else {
            in_word = false;
        }
    }

    count
}

/// Estimated reading time, e.g. "4 min read"
pub fn reading_time(words: usize, words_per_minute: usize) -> String {
    let wpm = words_per_minute.max(1);
    let minutes = words.div_ceil(wpm).max(1);
    format!("{} min read", minutes)
}

/// Truncate to at most `length` characters, appending `omission` when cut
pub fn truncate_chars(s: &str, length: usize, omission: &str) -> String {
    if s.chars().count() <= length {
        return s.to_string();
    }
    let truncated: String = s.chars().take(length).collect();
    format!("{}{}", truncated.trim_end(), omission)
}
