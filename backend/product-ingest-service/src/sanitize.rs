//! Text normalization for inbound product names.

use tracing::{debug, warn};

// The entity set both `escape_html` and `unescape_html` operate on.
const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Normalize a product name: title-case every word and escape
/// HTML-significant characters.
///
/// Empty input is returned unchanged; that is a diagnostic condition, not an
/// error. Idempotent: `sanitize_name(sanitize_name(x)) == sanitize_name(x)`.
pub fn sanitize_name(text: &str) -> String {
    if text.is_empty() {
        warn!("product name is empty, nothing to sanitize");
        return text.to_owned();
    }

    let sanitized = escape_html(&capitalize_words(&unescape_html(text)));
    if sanitized != text {
        debug!("sanitized product name: {} -> {}", text, sanitized);
    }
    sanitized
}

/// Title-case every whitespace-delimited word: the first letter of a word is
/// uppercased (leading punctuation is skipped over), the remaining letters
/// are lowercased. Case mapping is ASCII-only; repeated application never
/// changes the result again.
pub(crate) fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if ch.is_alphabetic() {
            if at_word_start {
                out.push(ch.to_ascii_uppercase());
                at_word_start = false;
            } else {
                out.push(ch.to_ascii_lowercase());
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Escape the HTML-significant characters `&`, `<`, `>`, `"` and `'`.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ENTITIES.iter().find(|(_, c)| *c == ch) {
            Some((entity, _)) => out.push_str(entity),
            None => out.push(ch),
        }
    }
    out
}

/// Decode the entities produced by [`escape_html`]. Unknown entities are
/// left untouched.
pub(crate) fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
