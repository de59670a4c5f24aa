//! SIMD-accelerated delimiter scanning using memchr
//!
//! Position-based helpers over the document bytes. The processor rewrites
//! its buffer between tokens, so nothing here holds on to the input; every
//! call takes the offset to start from and returns absolute offsets.

use memchr::{memchr, memchr3, memmem};

/// Find next occurrence of `byte` at or after `from`
#[inline]
pub fn find_byte(input: &[u8], from: usize, byte: u8) -> Option<usize> {
    input
        .get(from..)
        .and_then(|rest| memchr(byte, rest))
        .map(|i| from + i)
}

/// Find next occurrence of any of three bytes at or after `from`
#[inline]
pub fn find_byte3(input: &[u8], from: usize, b1: u8, b2: u8, b3: u8) -> Option<usize> {
    input
        .get(from..)
        .and_then(|rest| memchr3(b1, b2, b3, rest))
        .map(|i| from + i)
}

/// Find next occurrence of `needle` at or after `from`
#[inline]
pub fn find_sequence(input: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    input
        .get(from..)
        .and_then(|rest| memmem::find(rest, needle))
        .map(|i| from + i)
}

/// Check if the input has `needle` at `at`
#[inline]
pub fn starts_with_at(input: &[u8], at: usize, needle: &[u8]) -> bool {
    input.get(at..).is_some_and(|rest| rest.starts_with(needle))
}

/// Check if the input has `needle` at `at`, ignoring ASCII case
#[inline]
pub fn starts_with_ignore_case_at(input: &[u8], at: usize, needle: &[u8]) -> bool {
    input
        .get(at..at + needle.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(needle))
}

/// Check whether the unread part of the input could still grow into `needle`.
///
/// True when the input ends before `needle` is complete and everything that
/// is there agrees with it.
#[inline]
pub fn is_truncated_prefix(input: &[u8], at: usize, needle: &[u8]) -> bool {
    let rest = input.get(at..).unwrap_or_default();
    rest.len() < needle.len() && needle.starts_with(rest)
}

/// Number of XML whitespace bytes (space, tab, newline, carriage return) at `from`
#[inline]
pub fn whitespace_len(input: &[u8], from: usize) -> usize {
    input
        .get(from..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| is_whitespace(b))
        .count()
}

/// Number of whitespace or `/` bytes at `from`
#[inline]
pub fn whitespace_or_slash_len(input: &[u8], from: usize) -> usize {
    input
        .get(from..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| is_whitespace(b) || b == b'/')
        .count()
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_byte() {
        let input = b"hello <world>";
        assert_eq!(find_byte(input, 0, b'<'), Some(6));
        assert_eq!(find_byte(input, 7, b'<'), None);
        assert_eq!(find_byte(input, 100, b'<'), None);
    }

    #[test]
    fn test_find_byte3() {
        let input = b"value with & and <";
        assert_eq!(find_byte3(input, 0, b'<', b'&', b'"'), Some(11));
        assert_eq!(find_byte3(input, 12, b'<', b'&', b'"'), Some(17));
    }

    #[test]
    fn test_find_sequence() {
        let input = b"<!-- a -- b -->";
        assert_eq!(find_sequence(input, 4, b"--"), Some(7));
        assert_eq!(find_sequence(input, 9, b"--"), Some(12));
        assert_eq!(find_sequence(input, 14, b"--"), None);
    }

    #[test]
    fn test_truncated_prefix() {
        assert!(is_truncated_prefix(b"<![CD", 1, b"![CDATA["));
        assert!(is_truncated_prefix(b"<", 1, b"![CDATA["));
        assert!(!is_truncated_prefix(b"<![CX", 1, b"![CDATA["));
        assert!(!is_truncated_prefix(b"<![CDATA[x", 1, b"![CDATA["));
    }

    #[test]
    fn test_ignore_case() {
        assert!(starts_with_ignore_case_at(b"<?XmL-model", 2, b"xml"));
        assert!(!starts_with_ignore_case_at(b"<?xm", 2, b"xml"));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(whitespace_len(b"  \t\n hello", 0), 5);
        assert_eq!(whitespace_len(b"hello", 0), 0);
        assert_eq!(whitespace_or_slash_len(b"a / />", 1), 4);
        assert_eq!(whitespace_len(b"ab", 9), 0);
    }
}
