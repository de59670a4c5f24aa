//! Diagnostics recorded by the tag processor
//!
//! Nothing here is returned through `Result`: scanning failures surface as
//! parser states and misuse surfaces as a `false`/`None` return. The error
//! value is kept on the processor for callers that want to know why.

use thiserror::Error;

use super::attributes::InvalidAttribute;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    // Invalid input
    #[error("closing tag </{found}> does not match the open element {expected:?}")]
    MismatchedClosingTag {
        expected: Option<String>,
        found: String,
    },

    #[error("invalid closing tag at byte {0}: only whitespace may follow the tag name")]
    InvalidClosingTag(usize),

    #[error("invalid attribute name at byte {0}")]
    InvalidAttributeName(usize),

    #[error("attribute name without a value at byte {0}")]
    MissingAttributeValue(usize),

    #[error("unquoted attribute value at byte {0}")]
    UnquotedAttributeValue(usize),

    #[error("disallowed character in attribute value at byte {0} (either < or &)")]
    DisallowedAttributeCharacter(usize),

    #[error("duplicate attribute {0:?}")]
    DuplicateAttribute(String),

    #[error("invalid comment syntax at byte {0}: \"--\" must be followed by \">\"")]
    InvalidComment(usize),

    #[error("invalid attribute {0:?} in XML declaration")]
    InvalidDeclarationAttribute(String),

    #[error("unsupported XML version {0:?}")]
    UnsupportedXmlVersion(Option<String>),

    #[error("XML declaration closer not found at byte {0}")]
    MissingDeclarationCloser(usize),

    #[error("invalid processing instruction target at byte {0}")]
    InvalidProcessingInstructionTarget(usize),

    #[error("unexpected markup at byte {0}")]
    UnexpectedMarkup(usize),

    // API misuse
    #[error("attribute edits are only possible on an opening tag")]
    NotOnOpeningTag,

    #[error("invalid attribute {0:?}")]
    InvalidAttribute(InvalidAttribute),

    #[error("bookmarks can only be set on a token")]
    NotOnToken,

    #[error("too many bookmarks: cannot create any more (limit {0})")]
    TooManyBookmarks(usize),

    #[error("unknown bookmark {0:?}")]
    UnknownBookmark(String),

    #[error("too many calls to seek (limit {0})")]
    TooManySeeks(usize),
}

impl ProcessorError {
    /// Whether this error came from the document rather than from the caller
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            ProcessorError::NotOnOpeningTag
                | ProcessorError::InvalidAttribute(_)
                | ProcessorError::NotOnToken
                | ProcessorError::TooManyBookmarks(_)
                | ProcessorError::UnknownBookmark(_)
                | ProcessorError::TooManySeeks(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ProcessorError::MismatchedClosingTag {
            expected: Some("a".into()),
            found: "b".into(),
        };
        assert_eq!(
            err.to_string(),
            "closing tag </b> does not match the open element Some(\"a\")"
        );
        assert_eq!(
            ProcessorError::TooManyBookmarks(10).to_string(),
            "too many bookmarks: cannot create any more (limit 10)"
        );
    }

    #[test]
    fn test_classification() {
        assert!(ProcessorError::DuplicateAttribute("id".into()).is_invalid_input());
        assert!(ProcessorError::UnsupportedXmlVersion(None).is_invalid_input());
        assert!(!ProcessorError::TooManySeeks(1000).is_invalid_input());
        assert!(!ProcessorError::InvalidAttribute(InvalidAttribute::EmptyName).is_invalid_input());
    }
}
