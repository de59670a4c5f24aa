//! XML 1.0 (Fifth Edition) name character classes
//!
//! ```text
//! NameStartChar ::= ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6]
//!                 | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF]
//!                 | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF]
//!                 | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD]
//!                 | [#x10000-#xEFFFF]
//! NameChar      ::= NameStartChar | "-" | "." | [0-9] | #xB7
//!                 | [#x0300-#x036F] | [#x203F-#x2040]
//! ```

/// Check if a character may start an XML Name
#[inline]
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z' |
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}' |
        '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}'
    )
}

/// Check if a character may continue an XML Name
#[inline]
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' |
            '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}'
        )
}

/// Byte length of the XML Name starting at `at`, or 0 if none starts there.
///
/// `at` past the end of `input` or off a char boundary yields 0.
pub fn name_length(input: &str, at: usize) -> usize {
    let Some(rest) = input.get(at..) else {
        return 0;
    };

    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, c)) if is_name_start_char(c) => {}
        _ => return 0,
    }

    chars
        .find(|&(_, c)| !is_name_char(c))
        .map_or(rest.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_names() {
        assert_eq!(name_length("wp:content>", 0), 10);
        assert_eq!(name_length("<item-1 a", 1), 6);
        assert_eq!(name_length("_x.y", 0), 4);
    }

    #[test]
    fn test_invalid_start() {
        assert_eq!(name_length("1abc", 0), 0);
        assert_eq!(name_length("-abc", 0), 0);
        assert_eq!(name_length(".abc", 0), 0);
        assert_eq!(name_length(" abc", 0), 0);
        assert_eq!(name_length("abc", 3), 0);
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(name_length("café>", 0), "café".len());
        assert_eq!(name_length("日本語 x", 0), "日本語".len());
        assert_eq!(name_length("\u{10000}a", 0), 5);
        // U+00B7 may continue a name but not start one
        assert_eq!(name_length("a\u{B7}b", 0), 4);
        assert_eq!(name_length("\u{B7}b", 0), 0);
        // U+00D7 (multiplication sign) is excluded from both classes
        assert_eq!(name_length("a\u{D7}b", 0), 1);
    }
}
