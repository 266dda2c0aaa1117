use crate::consts::{SLUG_FALLBACK, SLUG_MAX_LEN};

/// Whitespace as browsers see it in form text (`\s` and `String.trim`).
///
/// Differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 does not.
pub fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Form text with surrounding [`is_form_whitespace`] removed.
pub fn trim_form_text(text: &str) -> &str {
    text.trim_matches(is_form_whitespace)
}

/// Filesystem-safe short form of the watermark text.
///
/// Keeps ASCII letters, digits and whitespace, collapses each whitespace run
/// to a single `_`, lowercases and truncates to [`SLUG_MAX_LEN`] characters.
/// May be empty.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for c in trim_form_text(text).chars() {
        if is_form_whitespace(c) {
            if !in_space {
                out.push('_');
                in_space = true;
            }
        } else if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            in_space = false;
        }
        // Anything else is dropped without ending a whitespace run, so
        // "a , b" still yields "a_b".
    }

    out.chars().take(SLUG_MAX_LEN).collect()
}

/// Name under which a downloaded result is saved: `watermarked-<slug>.jpg`.
pub fn download_filename(text: &str) -> String {
    let slug = slug(text);
    let slug = if slug.is_empty() { SLUG_FALLBACK } else { &slug };
    format!("watermarked-{slug}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(slug("Hello, World!!"), "hello_world");
    }

    #[test]
    fn test_slug_collapses_whitespace_runs() {
        assert_eq!(slug("a \t\n b"), "a_b");
        assert_eq!(slug("a , b"), "a_b");
    }

    #[test]
    fn test_slug_truncates() {
        assert_eq!(slug("Copyright 2025 Max Mustermann"), "copyright_2025_max_m");
    }

    #[test]
    fn test_form_whitespace_set() {
        assert!(is_form_whitespace('\u{FEFF}'));
        assert!(is_form_whitespace('\u{3000}'));
        assert!(!is_form_whitespace('\u{85}'));
        assert_eq!(trim_form_text("\u{FEFF} a \u{A0}"), "a");
    }

    #[test]
    fn test_slug_drops_non_ascii_letters() {
        assert_eq!(slug("Größe"), "gre");
    }
}
