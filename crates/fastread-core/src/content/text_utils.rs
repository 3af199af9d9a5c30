/// Returns the next whitespace-delimited word at or after `cursor` together
/// with the byte offset just past it.
pub(super) fn next_word_at(text: &str, cursor: usize) -> Option<(&str, usize)> {
    let rest = text.get(cursor..)?;
    let start = cursor + rest.find(|ch: char| !ch.is_whitespace())?;

    let tail = &text[start..];
    let end = tail
        .find(char::is_whitespace)
        .map_or(text.len(), |offset| start + offset);

    Some((&text[start..end], end))
}

/// Prefix of `text` holding at most `max_words` words, outer space trimmed.
pub fn first_words_excerpt(text: &str, max_words: usize) -> &str {
    if text.is_empty() || max_words == 0 {
        return "";
    }

    let mut words = 0usize;
    let mut in_word = false;

    for (idx, ch) in text.char_indices() {
        if !ch.is_whitespace() {
            in_word = true;
            continue;
        }

        if in_word {
            in_word = false;
            words += 1;
            if words >= max_words {
                return text[..idx].trim_start();
            }
        }
    }

    text.trim()
}
