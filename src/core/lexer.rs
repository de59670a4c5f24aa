//! Single-token XML lexer
//!
//! `lex` recognizes exactly one token starting at a given offset and reports
//! it as spans into the input. It never mutates anything and never looks at
//! nesting; the processor owns the cursor, the open-element stack and the
//! edit queue, and turns a `Lexed` value into parser state.
//!
//! A construct that runs into the end of the input is always `Incomplete`,
//! never a shortened token, so a caller holding a longer buffer can retry
//! from the same offset.

use super::attributes::AttributeToken;
use super::error::ProcessorError;
use super::scanner::{
    find_byte, find_byte3, find_sequence, is_truncated_prefix, is_whitespace, starts_with_at,
    starts_with_ignore_case_at, whitespace_len, whitespace_or_slash_len,
};
use super::span::Span;
use super::unicode::{is_name_start_char, name_length};

/// Names allowed inside `<?xml ...?>`
const DECLARATION_ATTRIBUTES: [&str; 3] = ["version", "encoding", "standalone"];

/// A tag as far as it was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagToken {
    pub token: Span,
    pub name: Span,
    pub closing: bool,
    pub empty: bool,
    pub attributes: Vec<AttributeToken>,
}

/// Result of lexing one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lexed {
    Text(Span),
    Tag(TagToken),
    /// `</>`
    PresumptuousTag(Span),
    Comment { token: Span, text: Span },
    CData { token: Span, text: Span },
    Doctype { token: Span, text: Span },
    ProcessingInstruction { token: Span, target: Span, text: Span },
    XmlDeclaration {
        token: Span,
        text: Span,
        attributes: Vec<AttributeToken>,
    },
    Incomplete,
    /// `partial` holds the tag read up to the failure, if the failure was
    /// inside a tag.
    Invalid {
        error: ProcessorError,
        partial: Option<TagToken>,
    },
}

impl Lexed {
    fn invalid(error: ProcessorError) -> Self {
        Lexed::Invalid {
            error,
            partial: None,
        }
    }
}

/// Intermediate result of the sub-lexers
enum Step<T> {
    Found(T),
    Incomplete,
    Invalid(ProcessorError),
}

/// Lex the token starting at `at`. `at` must be inside the input.
pub(crate) fn lex(xml: &str, at: usize) -> Lexed {
    let bytes = xml.as_bytes();
    let doc_length = bytes.len();

    // Text runs up to the next '<' or the end of the document
    match find_byte(bytes, at, b'<') {
        None => return Lexed::Text(Span::new(at, doc_length - at)),
        Some(lt) if lt > at => return Lexed::Text(Span::new(at, lt - at)),
        Some(_) => {}
    }

    let closing = bytes.get(at + 1) == Some(&b'/');
    let name_at = if closing { at + 2 } else { at + 1 };

    let tag_name_length = name_length(xml, name_at);
    if tag_name_length > 0 {
        return lex_tag(xml, at, Span::new(name_at, tag_name_length), closing);
    }

    // "<" or "</" at the very end
    if name_at >= doc_length {
        return Lexed::Incomplete;
    }

    if closing {
        if bytes[name_at] == b'>' {
            return Lexed::PresumptuousTag(Span::new(at, 3));
        }
        return Lexed::invalid(ProcessorError::UnexpectedMarkup(at));
    }

    match bytes[at + 1] {
        b'!' => lex_bang(bytes, at),
        b'?' => lex_question(xml, at),
        _ => Lexed::invalid(ProcessorError::UnexpectedMarkup(at)),
    }
}

/// Opening or closing tag, `name` already read
fn lex_tag(xml: &str, at: usize, name: Span, closing: bool) -> Lexed {
    let bytes = xml.as_bytes();
    let doc_length = bytes.len();
    let mut tag = TagToken {
        token: Span::new(at, 0),
        name,
        closing,
        empty: false,
        attributes: Vec::new(),
    };

    let mut pos = name.end();

    if closing {
        pos += whitespace_len(bytes, pos);
        if pos >= doc_length {
            return Lexed::Incomplete;
        }
        if bytes[pos] != b'>' {
            return Lexed::Invalid {
                error: ProcessorError::InvalidClosingTag(pos),
                partial: Some(tag),
            };
        }
        tag.token.length = pos + 1 - at;
        return Lexed::Tag(tag);
    }

    loop {
        pos += whitespace_or_slash_len(bytes, pos);
        if pos >= doc_length {
            return Lexed::Incomplete;
        }
        if bytes[pos] == b'>' {
            break;
        }

        match lex_attribute(xml, pos) {
            Step::Found((attribute, next)) => {
                if tag.attributes.iter().any(|a| a.name == attribute.name) {
                    let error = ProcessorError::DuplicateAttribute(attribute.name);
                    return Lexed::Invalid {
                        error,
                        partial: Some(tag),
                    };
                }
                tag.attributes.push(attribute);
                pos = next;
            }
            Step::Incomplete => return Lexed::Incomplete,
            Step::Invalid(error) => {
                return Lexed::Invalid {
                    error,
                    partial: Some(tag),
                }
            }
        }
    }

    // Only a `/` right before `>` closes the element; `<a/ >` opens one
    tag.empty = bytes[pos - 1] == b'/';
    tag.token.length = pos + 1 - at;
    Lexed::Tag(tag)
}

/// One `name="value"` pair starting at `pos`.
///
/// Returns the attribute and the offset just past its closing quote.
fn lex_attribute(xml: &str, pos: usize) -> Step<(AttributeToken, usize)> {
    let bytes = xml.as_bytes();
    let doc_length = bytes.len();

    let attribute_name_length = name_length(xml, pos);
    if attribute_name_length == 0 {
        return Step::Invalid(ProcessorError::InvalidAttributeName(pos));
    }

    let mut at = pos + attribute_name_length;
    at += whitespace_len(bytes, at);
    if at >= doc_length {
        return Step::Incomplete;
    }
    if bytes[at] != b'=' {
        return Step::Invalid(ProcessorError::MissingAttributeValue(pos));
    }

    at += 1;
    at += whitespace_len(bytes, at);
    if at >= doc_length {
        return Step::Incomplete;
    }

    let quote = bytes[at];
    if quote != b'"' && quote != b'\'' {
        return Step::Invalid(ProcessorError::UnquotedAttributeValue(at));
    }

    let value_start = at + 1;
    let mut search_from = value_start;
    let value_end = loop {
        match find_byte3(bytes, search_from, b'<', b'&', quote) {
            None => return Step::Incomplete,
            Some(end) if bytes[end] == quote => break end,
            Some(end) if bytes[end] == b'&' => match reference_length(xml, end) {
                Step::Found(length) => search_from = end + length,
                Step::Incomplete => return Step::Incomplete,
                Step::Invalid(error) => return Step::Invalid(error),
            },
            Some(end) => {
                return Step::Invalid(ProcessorError::DisallowedAttributeCharacter(end));
            }
        }
    };

    let attribute_end = value_end + 1;
    let attribute = AttributeToken::new(
        &xml[pos..pos + attribute_name_length],
        Span::new(value_start, value_end - value_start),
        Span::new(pos, attribute_end - pos),
    );
    Step::Found((attribute, attribute_end))
}

/// Length of the character or entity reference at `amp`, `&` and `;` included.
///
/// A bare `&` is a disallowed character in an attribute value.
fn reference_length(xml: &str, amp: usize) -> Step<usize> {
    let bytes = xml.as_bytes();
    let doc_length = bytes.len();
    let disallowed = Step::Invalid(ProcessorError::DisallowedAttributeCharacter(amp));

    let mut at = amp + 1;
    if at >= doc_length {
        return Step::Incomplete;
    }

    if bytes[at] == b'#' {
        at += 1;
        let hex = matches!(bytes.get(at), Some(b'x'));
        if hex {
            at += 1;
        }
        let digits = bytes
            .get(at..)
            .unwrap_or_default()
            .iter()
            .take_while(|b| if hex { b.is_ascii_hexdigit() } else { b.is_ascii_digit() })
            .count();
        at += digits;
        if at >= doc_length {
            return Step::Incomplete;
        }
        if digits == 0 || bytes[at] != b';' {
            return disallowed;
        }
        return Step::Found(at + 1 - amp);
    }

    let entity_name_length = name_length(xml, at);
    at += entity_name_length;
    if at >= doc_length {
        return Step::Incomplete;
    }
    if entity_name_length == 0 || bytes[at] != b';' {
        return disallowed;
    }
    Step::Found(at + 1 - amp)
}

/// `<!--`, `<![CDATA[` or `<!DOCTYPE`
fn lex_bang(bytes: &[u8], at: usize) -> Lexed {
    const COMMENT: &[u8] = b"<!--";
    const CDATA: &[u8] = b"<![CDATA[";
    const DOCTYPE: &[u8] = b"<!DOCTYPE";

    if starts_with_at(bytes, at, COMMENT) {
        return lex_comment(bytes, at);
    }
    if starts_with_at(bytes, at, CDATA) {
        return lex_cdata(bytes, at);
    }
    if starts_with_at(bytes, at, DOCTYPE) {
        return lex_doctype(bytes, at);
    }

    if [COMMENT, CDATA, DOCTYPE]
        .iter()
        .any(|opener| is_truncated_prefix(bytes, at, opener))
    {
        return Lexed::Incomplete;
    }

    Lexed::invalid(ProcessorError::UnexpectedMarkup(at))
}

/// `<!-- ... -->`. Any "--" inside must be the start of the closer.
fn lex_comment(bytes: &[u8], at: usize) -> Lexed {
    let text_start = at + 4;

    let Some(closer_at) = find_sequence(bytes, text_start, b"--") else {
        return Lexed::Incomplete;
    };

    match bytes.get(closer_at + 2) {
        None => Lexed::Incomplete,
        Some(b'>') => Lexed::Comment {
            token: Span::new(at, closer_at + 3 - at),
            text: Span::new(text_start, closer_at - text_start),
        },
        Some(_) => Lexed::invalid(ProcessorError::InvalidComment(closer_at)),
    }
}

/// `<![CDATA[ ... ]]>`
fn lex_cdata(bytes: &[u8], at: usize) -> Lexed {
    let text_start = at + 9;

    match find_sequence(bytes, text_start, b"]]>") {
        None => Lexed::Incomplete,
        Some(closer_at) => Lexed::CData {
            token: Span::new(at, closer_at + 3 - at),
            text: Span::new(text_start, closer_at - text_start),
        },
    }
}

/// `<!DOCTYPE ... >`, where an internal subset in `[...]` and quoted
/// literals may contain `>`
fn lex_doctype(bytes: &[u8], at: usize) -> Lexed {
    let text_start = at + 9;
    let mut quote: Option<u8> = None;
    let mut in_subset = false;

    for (pos, &b) in bytes.iter().enumerate().skip(text_start) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'[' => in_subset = true,
                b']' => in_subset = false,
                b'>' if !in_subset => {
                    return Lexed::Doctype {
                        token: Span::new(at, pos + 1 - at),
                        text: Span::new(text_start, pos - text_start),
                    }
                }
                _ => {}
            },
        }
    }

    Lexed::Incomplete
}

/// `<?xml ...?>` at the start of the document, or a processing instruction
fn lex_question(xml: &str, at: usize) -> Lexed {
    let bytes = xml.as_bytes();
    let doc_length = bytes.len();

    if at == 0
        && starts_with_at(bytes, 0, b"<?xml")
        && bytes.get(5).is_some_and(|&b| is_whitespace(b) || b == b'?')
    {
        return lex_declaration(xml);
    }

    let target_at = at + 2;
    let target_length = name_length(xml, target_at);
    let target_end = target_at + target_length;

    // The target may still be growing
    if target_end >= doc_length {
        return Lexed::Incomplete;
    }

    if target_length <= 3 || !starts_with_ignore_case_at(bytes, target_at, b"xml") {
        return Lexed::invalid(ProcessorError::InvalidProcessingInstructionTarget(at));
    }

    let text_start = target_end + whitespace_len(bytes, target_end);
    match find_sequence(bytes, text_start, b"?>") {
        None => Lexed::Incomplete,
        Some(closer_at) => Lexed::ProcessingInstruction {
            token: Span::new(at, closer_at + 2 - at),
            target: Span::new(target_at, target_length),
            text: Span::new(text_start, closer_at - text_start),
        },
    }
}

/// `<?xml version="1.0" encoding="..." standalone="..."?>`
fn lex_declaration(xml: &str) -> Lexed {
    let bytes = xml.as_bytes();
    let doc_length = bytes.len();
    let mut attributes: Vec<AttributeToken> = Vec::new();

    let mut pos = 5 + whitespace_len(bytes, 5);
    loop {
        if pos >= doc_length {
            return Lexed::Incomplete;
        }
        if bytes[pos] == b'?' {
            break;
        }
        let starts_name = xml[pos..].chars().next().is_some_and(is_name_start_char);
        if !starts_name {
            return Lexed::invalid(ProcessorError::MissingDeclarationCloser(pos));
        }

        match lex_attribute(xml, pos) {
            Step::Found((attribute, next)) => {
                if attributes.iter().any(|a| a.name == attribute.name) {
                    return Lexed::invalid(ProcessorError::DuplicateAttribute(attribute.name));
                }
                attributes.push(attribute);
                pos = next + whitespace_len(bytes, next);
            }
            Step::Incomplete => return Lexed::Incomplete,
            Step::Invalid(error) => return Lexed::invalid(error),
        }
    }

    if let Some(unknown) = attributes
        .iter()
        .find(|a| !DECLARATION_ATTRIBUTES.contains(&a.name.as_str()))
    {
        return Lexed::invalid(ProcessorError::InvalidDeclarationAttribute(
            unknown.name.clone(),
        ));
    }

    let version = attributes
        .iter()
        .find(|a| a.name == "version")
        .map(|a| a.value.slice(xml));
    if version != Some("1.0") {
        return Lexed::invalid(ProcessorError::UnsupportedXmlVersion(
            version.map(str::to_string),
        ));
    }

    match bytes.get(pos + 1) {
        None => Lexed::Incomplete,
        Some(b'>') => Lexed::XmlDeclaration {
            token: Span::new(0, pos + 2),
            text: Span::new(2, pos - 2),
            attributes,
        },
        Some(_) => Lexed::invalid(ProcessorError::MissingDeclarationCloser(pos)),
    }
}
