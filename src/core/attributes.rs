//! XML Attribute Tokens
//!
//! What the processor remembers about each attribute of the current tag,
//! plus the checks `set_attribute` runs before it queues any text.

use super::span::Span;
use super::unicode::name_length;

/// A parsed attribute: its name and where its pieces sit in the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeToken {
    /// Attribute name, exact case
    pub name: String,
    /// Raw value between the quotes
    pub value: Span,
    /// The whole `name="value"` pair, quotes included
    pub whole: Span,
}

impl AttributeToken {
    pub fn new(name: impl Into<String>, value: Span, whole: Span) -> Self {
        AttributeToken {
            name: name.into(),
            value,
            whole,
        }
    }
}

/// Why a name or value was refused by `set_attribute`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidAttribute {
    Name(char),
    Value(char),
    EmptyName,
}

/// Check a name for `set_attribute`.
///
/// The name must be an XML Name, so the parser can read back whatever is
/// written. Markup delimiters, whitespace, `/`, control characters and
/// Unicode noncharacters are reported first. A name read from the source may
/// still fail here when it holds a noncharacter.
pub fn validate_name(name: &str) -> Result<(), InvalidAttribute> {
    if name.is_empty() {
        return Err(InvalidAttribute::EmptyName);
    }

    if let Some(c) = name.chars().find(|&c| is_forbidden_in_name(c)) {
        return Err(InvalidAttribute::Name(c));
    }

    match name[name_length(name, 0)..].chars().next() {
        Some(c) => Err(InvalidAttribute::Name(c)),
        None => Ok(()),
    }
}

/// Check a value for `set_attribute`.
///
/// Values are always written inside double quotes, so `"` is refused along
/// with `<` and `&`. This is stricter than what the parser accepts from the
/// source (there only `<`, `&` and the delimiting quote are refused).
pub fn validate_value(value: &str) -> Result<(), InvalidAttribute> {
    match value.chars().find(|&c| is_forbidden_in_value(c)) {
        Some(c) => Err(InvalidAttribute::Value(c)),
        None => Ok(()),
    }
}

fn is_forbidden_in_name(c: char) -> bool {
    matches!(c, '"' | '\'' | '>' | '&' | '<' | '/' | ' ' | '=')
        || c <= '\u{1F}'
        || is_noncharacter(c)
}

fn is_forbidden_in_value(c: char) -> bool {
    matches!(c, '<' | '&' | '"')
        || (c <= '\u{1F}' && !matches!(c, '\t' | '\n' | '\r'))
        || is_noncharacter(c)
}

/// U+FDD0..U+FDEF and the last two code points of every plane
#[inline]
fn is_noncharacter(c: char) -> bool {
    let cp = c as u32;
    (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(validate_name("data-id"), Ok(()));
        assert_eq!(validate_name("xlink:href"), Ok(()));
        assert_eq!(validate_name("café"), Ok(()));
    }

    #[test]
    fn test_delimiters_in_name() {
        for c in ['"', '\'', '>', '&', '<', '/', ' ', '='] {
            let name = format!("a{c}b");
            assert_eq!(validate_name(&name), Err(InvalidAttribute::Name(c)), "{name:?}");
        }
        assert_eq!(validate_name(""), Err(InvalidAttribute::EmptyName));
    }

    #[test]
    fn test_controls_and_noncharacters_in_name() {
        assert_eq!(validate_name("a\u{0}"), Err(InvalidAttribute::Name('\u{0}')));
        assert_eq!(validate_name("a\tb"), Err(InvalidAttribute::Name('\t')));
        assert_eq!(validate_name("\u{FDD0}"), Err(InvalidAttribute::Name('\u{FDD0}')));
        assert_eq!(validate_name("\u{FFFF}"), Err(InvalidAttribute::Name('\u{FFFF}')));
        assert_eq!(validate_name("\u{1FFFE}"), Err(InvalidAttribute::Name('\u{1FFFE}')));
        assert_eq!(validate_name("\u{10FFFF}"), Err(InvalidAttribute::Name('\u{10FFFF}')));
        assert_eq!(validate_name("\u{FFFD}"), Ok(()));
    }

    #[test]
    fn test_names_outside_xml_name() {
        assert_eq!(validate_name("1x"), Err(InvalidAttribute::Name('1')));
        assert_eq!(validate_name("-x"), Err(InvalidAttribute::Name('-')));
        assert_eq!(validate_name(".x"), Err(InvalidAttribute::Name('.')));
        assert_eq!(validate_name("a!b"), Err(InvalidAttribute::Name('!')));
        assert_eq!(validate_name("a,b"), Err(InvalidAttribute::Name(',')));
        assert_eq!(validate_name("_x.y-1"), Ok(()));
    }

    #[test]
    fn test_values() {
        assert_eq!(validate_value("https://example.com/?a=1"), Ok(()));
        assert_eq!(validate_value("it's > fine"), Ok(()));
        assert_eq!(validate_value("line\nbreak\tand\rreturn"), Ok(()));
        assert_eq!(validate_value(""), Ok(()));
        assert_eq!(validate_value("a<b"), Err(InvalidAttribute::Value('<')));
        assert_eq!(validate_value("a&amp;b"), Err(InvalidAttribute::Value('&')));
        assert_eq!(validate_value("say \"hi\""), Err(InvalidAttribute::Value('"')));
        assert_eq!(validate_value("bell\u{7}"), Err(InvalidAttribute::Value('\u{7}')));
        assert_eq!(validate_value("\u{FDEF}"), Err(InvalidAttribute::Value('\u{FDEF}')));
    }
}
