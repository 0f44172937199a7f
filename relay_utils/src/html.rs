//! Helpers for embedding untrusted text into HTML documents.

/// Trims `value`, removes all markup from it and encodes the remaining special
/// characters as HTML entities.
pub fn sanitize_text(value: &str) -> String {
    encode_entities(&strip_tags(value.trim()))
}

/// Removes every character that cannot be part of an email address.
///
/// Letters, digits and ``!#$%&'*+-=?^_`{|}~@.[]`` are kept.
pub fn sanitize_email(value: &str) -> String {
    value
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(c))
        .collect()
}

/// Encodes `&`, `<`, `>`, `"` and `'` as HTML entities.
pub fn encode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Removes html tags and comments from `value`.
///
/// A `<` that is followed by whitespace (or ends the input) does not open a
/// tag and is kept. Everything after an unterminated tag is dropped.
pub fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if after.chars().next().map_or(true, char::is_whitespace) {
            out.push('<');
            rest = after;
            continue;
        }

        let end = if after.starts_with("!--") {
            after.find("-->").map(|end| end + 3)
        } else {
            tag_end(after)
        };

        match end {
            Some(end) => rest = &after[end..],
            None => return out,
        }
    }

    out.push_str(rest);
    out
}

/// Byte offset right after the `>` that closes the tag `value` starts with.
fn tag_end(value: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote = None;
    for (i, c) in value.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '<') => depth += 1,
            (None, '>') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            (None, _) => {}
        }
    }
    None
}
