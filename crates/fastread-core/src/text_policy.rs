//! Shared text shaping for compact labels: previews, progress, titles.

use chrono::{DateTime, Utc};

pub const COMPACT_MAX_WORDS: usize = 7;
pub const COMPACT_MAX_CHARS: usize = 34;

const SESSION_TITLE_PREFIX: &str = "Reading Session - ";

pub fn preview_compact(source: &str) -> String {
    preview_limited(source, COMPACT_MAX_WORDS, COMPACT_MAX_CHARS)
}

/// Single-line preview of `source`, collapsing whitespace and appending
/// `...` when either limit cuts it short.
pub fn preview_limited(source: &str, max_words: usize, max_chars: usize) -> String {
    let mut out = String::new();
    let mut char_count = 0usize;
    let mut truncated = false;

    for (word_count, word) in source.split_whitespace().enumerate() {
        if word_count >= max_words {
            truncated = true;
            break;
        }

        if word_count > 0 {
            if char_count >= max_chars {
                truncated = true;
                break;
            }
            out.push(' ');
            char_count += 1;
        }

        for ch in word.chars() {
            if char_count >= max_chars {
                truncated = true;
                break;
            }
            out.push(ch);
            char_count += 1;
        }

        if truncated {
            break;
        }
    }

    if out.is_empty() {
        return out;
    }

    if truncated {
        out.truncate(out.trim_end().len());
        out.push_str("...");
    }

    out
}

/// One-based progress label, e.g. `Word 3 of 10`.
pub fn progress_label(index: usize, total: usize) -> String {
    if total == 0 {
        return String::from("Word 0 of 0");
    }
    format!("Word {} of {}", index.min(total - 1) + 1, total)
}

/// Default title for a saved session: `Reading Session - MM/DD/YYYY` (UTC).
pub fn session_title(unix_ms: u64) -> String {
    let date = i64::try_from(unix_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default();
    format!("{SESSION_TITLE_PREFIX}{}", date.format("%m/%d/%Y"))
}

/// Human readable age of an entry relative to `now_ms`.
pub fn time_ago(created_at_ms: u64, now_ms: u64) -> String {
    let diff = now_ms.saturating_sub(created_at_ms) / 1_000;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3_600 {
        let mins = diff / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86_400 {
        let hours = diff / 3_600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 604_800 {
        let days = diff / 86_400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        let weeks = diff / 604_800;
        format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" })
    }
}
