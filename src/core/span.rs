//! Span and TextReplacement - offsets into the document buffer
//!
//! Both are plain values. They never borrow the buffer, so they stay valid
//! across rewrites as long as whoever holds them shifts them along.

/// A region of the document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset into the document
    pub start: usize,
    /// Length in bytes
    pub length: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Get the end offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    /// Extract the text from the document, or `""` if out of range
    #[inline]
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start..self.end()).unwrap_or("")
    }
}

/// A pending edit: replace `length` bytes at `start` with `text`.
///
/// An insertion has `length == 0`; a deletion has an empty `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReplacement {
    pub start: usize,
    pub length: usize,
    pub text: String,
}

impl TextReplacement {
    #[inline]
    pub fn new(start: usize, length: usize, text: impl Into<String>) -> Self {
        TextReplacement {
            start,
            length,
            text: text.into(),
        }
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    /// How far everything after this replacement moves once it is applied.
    #[inline]
    pub fn shift(&self) -> isize {
        self.text.len() as isize - self.length as isize
    }
}

/// Move `offset` by `delta`, clamping at zero.
#[inline]
pub(crate) fn shifted(offset: usize, delta: isize) -> usize {
    offset.saturating_add_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        let span = Span::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert_eq!(span.end(), 15);
    }

    #[test]
    fn test_span_slice() {
        let input = "hello world";
        assert_eq!(Span::new(6, 5).slice(input), "world");
        assert_eq!(Span::new(6, 50).slice(input), "");
    }

    #[test]
    fn test_replacement_shift() {
        assert_eq!(TextReplacement::new(3, 0, " a=\"b\"").shift(), 6);
        assert_eq!(TextReplacement::new(3, 7, "").shift(), -7);
        assert_eq!(TextReplacement::new(3, 7, "x=\"12\"").end(), 10);
    }

    #[test]
    fn test_shifted_clamps() {
        assert_eq!(shifted(10, -4), 6);
        assert_eq!(shifted(2, -4), 0);
        assert_eq!(shifted(2, 4), 6);
    }
}
