use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

/// Check a single input value.
///
/// Emails must look like `local@domain.tld`, every other field must contain
/// something besides whitespace.
pub fn validate_field(kind: FieldKind, value: &str) -> bool {
    let value = value.trim();
    match kind {
        FieldKind::Text => !value.is_empty(),
        FieldKind::Email => EMAIL_REGEX.is_match(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text() {
        assert!(validate_field(FieldKind::Text, "Alice"));
        assert!(validate_field(FieldKind::Text, "  x "));
        assert!(!validate_field(FieldKind::Text, ""));
        assert!(!validate_field(FieldKind::Text, " \t\n "));
    }

    #[test]
    fn email() {
        for valid in [
            "alice@example.com",
            "  alice@example.com  ",
            "a.b+c@sub.example.org",
            "x@y.z",
        ] {
            assert!(validate_field(FieldKind::Email, valid), "{valid}");
        }

        for invalid in [
            "",
            "bad",
            "alice@example",
            "@example.com",
            "alice@.com",
            "alice@@example.com",
            "ali ce@example.com",
            "alice@example.",
        ] {
            assert!(!validate_field(FieldKind::Email, invalid), "{invalid}");
        }
    }
}
