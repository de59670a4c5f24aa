//! XML Entity Decoding
//!
//! Handles decoding of XML entities:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Anything else (unknown names, missing `;`, references to characters XML
//! does not allow) is kept verbatim. Uses Cow for zero-copy when no entities
//! are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode the raw text of an attribute value
#[inline]
pub fn decode_attribute(input: &str) -> Cow<'_, str> {
    decode(input)
}

/// Decode the raw text of a text node
#[inline]
pub fn decode_text_node(input: &str) -> Cow<'_, str> {
    decode(input)
}

fn decode(input: &str) -> Cow<'_, str> {
    // Fast path: check if there are any entities using SIMD
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_entities(input))
}

/// Decode all entity references in the input
fn decode_entities(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp_pos) = memchr(b'&', rest.as_bytes()) {
        // Copy everything before the entity
        result.push_str(&rest[..amp_pos]);
        rest = &rest[amp_pos..];

        let decoded = memchr(b';', rest.as_bytes())
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                result.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                // Unknown or malformed entity, keep the ampersand
                result.push('&');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Decode a single entity (without & and ;)
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => decode_numeric_entity(entity.strip_prefix('#')?),
    }
}

/// Decode a numeric character reference
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let codepoint = match entity.strip_prefix(['x', 'X']) {
        // Hexadecimal: &#xHHHH;
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        // Decimal: &#DDDD;
        None if !entity.is_empty() && entity.bytes().all(|b| b.is_ascii_digit()) => {
            entity.parse::<u32>().ok()?
        }
        None => return None,
    };

    if !is_valid_xml_char(codepoint) {
        return None;
    }

    char::from_u32(codepoint)
}

/// Check if a code point is a valid XML 1.0 Char
/// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
#[inline]
pub fn is_valid_xml_char(codepoint: u32) -> bool {
    matches!(codepoint,
        0x9 | 0xA | 0xD |
        0x20..=0xD7FF |
        0xE000..=0xFFFD |
        0x10000..=0x10FFFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities() {
        let result = decode_text_node("Hello, World!");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_basic_entities() {
        let result = decode_text_node("&lt;hello&gt; &amp; &quot;world&quot; &apos;");
        assert_eq!(result, "<hello> & \"world\" '");
    }

    #[test]
    fn test_numeric_decimal() {
        assert_eq!(decode_attribute("&#65;&#66;&#67;"), "ABC");
    }

    #[test]
    fn test_numeric_hex() {
        assert_eq!(decode_attribute("&#x41;&#X42;&#x43;"), "ABC");
    }

    #[test]
    fn test_unicode_entity() {
        assert_eq!(decode_text_node("&#x1F600;"), "😀");
    }

    #[test]
    fn test_unknown_entity() {
        assert_eq!(decode_text_node("&unknown; &nbsp;"), "&unknown; &nbsp;");
    }

    #[test]
    fn test_malformed_references() {
        assert_eq!(decode_text_node("a & b"), "a & b");
        assert_eq!(decode_text_node("&#;&#x;&#12a;&amp"), "&#;&#x;&#12a;&amp");
        assert_eq!(decode_text_node("&#+65;"), "&#+65;");
    }

    #[test]
    fn test_disallowed_characters_are_kept() {
        assert_eq!(decode_text_node("&#0;&#xD800;&#x110000;"), "&#0;&#xD800;&#x110000;");
    }

    #[test]
    fn test_mixed_non_ascii() {
        assert_eq!(decode_text_node("café &amp; thé"), "café & thé");
    }
}
