//! Escape sequence processing for string literals.
//!
//! Recognized escapes: `\"`, `\\`, `\n`, `\t`, `\r`. Unrecognized escapes
//! are kept literally (`\q` stays `\q`).

#[inline]
pub(crate) fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Unescape the raw contents of a string literal (without the quotes).
pub(crate) fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(esc) => match resolve_escape(esc) {
                Some(resolved) => result.push(resolved),
                None => {
                    result.push('\\');
                    result.push(esc);
                }
            },
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_escapes() {
        assert_eq!(unescape_string(r"a\nb"), "a\nb");
        assert_eq!(unescape_string(r"\t\r"), "\t\r");
        assert_eq!(unescape_string(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape_string(r"back\\slash"), "back\\slash");
    }

    #[test]
    fn unknown_escapes_are_preserved() {
        assert_eq!(unescape_string(r"\q"), "\\q");
        assert_eq!(unescape_string(r"\0"), "\\0");
    }

    #[test]
    fn no_escapes() {
        assert_eq!(unescape_string("🙂 plain"), "🙂 plain");
        assert_eq!(unescape_string(""), "");
    }
}
