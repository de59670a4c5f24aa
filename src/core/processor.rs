//! XML Tag Processor - streaming tokenizer with in-place attribute edits
//!
//! `XmlTagProcessor` walks a document one token at a time. While it is
//! paused on an opening tag the caller may queue attribute changes; they are
//! not applied to the buffer until the document is asked for
//! (`get_updated_xml`) or a seek needs exact offsets. Applying them rewrites
//! the buffer once, shifts the cursor and every bookmark, and rescans the
//! current token so it reflects the edits.
//!
//! Scanning failures are parser states, not errors: `IncompleteInput` leaves
//! the cursor at the start of the unfinished token, `InvalidInput` stops the
//! processor for good. The reason for the last failure or refused call is
//! kept in `get_last_error`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::mem;

use log::{debug, trace, warn};

use super::attributes::{self, AttributeToken};
use super::config::ProcessorConfig;
use super::entities::{decode_attribute, decode_text_node};
use super::error::ProcessorError;
use super::lexer::{self, Lexed, TagToken};
use super::query::TagQuery;
use super::span::{shifted, Span, TextReplacement};

/// Current parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Nothing scanned yet, or about to rescan after a seek
    Ready,
    /// The whole document has been read
    Complete,
    /// The document ends inside a token
    IncompleteInput,
    /// The document broke a lexical rule; nothing more will be read
    InvalidInput,
    MatchedTag,
    TextNode,
    CDataNode,
    Comment,
    Doctype,
    /// `</>`
    PresumptuousTag,
    PiNode,
    XmlDeclaration,
}

impl ParserState {
    /// Whether the processor is paused on a token
    pub fn is_token(self) -> bool {
        !matches!(
            self,
            ParserState::Ready
                | ParserState::Complete
                | ParserState::IncompleteInput
                | ParserState::InvalidInput
        )
    }

    /// Whether `next_token` can no longer make progress
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            ParserState::Complete | ParserState::IncompleteInput | ParserState::InvalidInput
        )
    }
}

/// Kind of the current token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Tag,
    Text,
    CDataSection,
    Comment,
    XmlDeclaration,
    ProcessingInstruction,
    Doctype,
    PresumptuousTag,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Tag => "#tag",
            TokenType::Text => "#text",
            TokenType::CDataSection => "#cdata-section",
            TokenType::Comment => "#comment",
            TokenType::XmlDeclaration => "#xml-declaration",
            TokenType::ProcessingInstruction => "#processing-instructions",
            TokenType::Doctype => "xml",
            TokenType::PresumptuousTag => "#presumptuous-tag",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued change to one attribute of the current tag
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeUpdate {
    /// New attribute, written right after the tag name
    Insert {
        at: usize,
        name: String,
        value: String,
    },
    /// Existing `name="value"` pair rewritten
    Replace {
        span: Span,
        name: String,
        value: String,
    },
    /// Existing pair erased
    Remove { span: Span },
}

impl AttributeUpdate {
    /// The value a read should see before the update is applied
    fn enqueued_value(&self) -> Option<&str> {
        match self {
            AttributeUpdate::Insert { value, .. } | AttributeUpdate::Replace { value, .. } => {
                Some(value)
            }
            AttributeUpdate::Remove { .. } => None,
        }
    }

    fn into_replacement(self) -> TextReplacement {
        match self {
            AttributeUpdate::Insert { at, name, value } => {
                TextReplacement::new(at, 0, format!(" {name}=\"{value}\""))
            }
            AttributeUpdate::Replace { span, name, value } => {
                TextReplacement::new(span.start, span.length, format!("{name}=\"{value}\""))
            }
            AttributeUpdate::Remove { span } => TextReplacement::new(span.start, span.length, ""),
        }
    }
}

/// What the current token did to the open-element stack
#[derive(Debug, Clone, PartialEq, Eq)]
enum StackEffect {
    None,
    Pushed,
    Popped(String),
}

#[derive(Debug, Clone)]
struct Bookmark {
    span: Span,
    /// Open elements before the bookmarked token
    open_elements: Vec<String>,
}

/// Streaming XML tokenizer with queued attribute edits
#[derive(Debug, Clone)]
pub struct XmlTagProcessor {
    xml: String,
    config: ProcessorConfig,
    last_query: TagQuery,
    parser_state: ParserState,

    bytes_already_parsed: usize,
    token_starts_at: Option<usize>,
    token_length: usize,
    tag_name_starts_at: Option<usize>,
    tag_name_length: usize,
    text_starts_at: Option<usize>,
    text_length: usize,
    is_closing_tag: bool,

    attributes: Vec<AttributeToken>,
    /// Edits to the current tag, one per attribute name
    attribute_updates: HashMap<String, AttributeUpdate>,
    /// Edits to tags already passed
    lexical_updates: Vec<TextReplacement>,

    bookmarks: HashMap<String, Bookmark>,
    open_elements: Vec<String>,
    stack_effect: StackEffect,
    seek_count: usize,
    last_error: Option<ProcessorError>,
}

impl XmlTagProcessor {
    /// Create a processor with the default limits
    pub fn new(xml: impl Into<String>) -> Self {
        Self::with_config(xml, ProcessorConfig::default())
    }

    pub fn with_config(xml: impl Into<String>, config: ProcessorConfig) -> Self {
        XmlTagProcessor {
            xml: xml.into(),
            config,
            last_query: TagQuery::Any,
            parser_state: ParserState::Ready,
            bytes_already_parsed: 0,
            token_starts_at: None,
            token_length: 0,
            tag_name_starts_at: None,
            tag_name_length: 0,
            text_starts_at: None,
            text_length: 0,
            is_closing_tag: false,
            attributes: Vec::new(),
            attribute_updates: HashMap::new(),
            lexical_updates: Vec::new(),
            bookmarks: HashMap::new(),
            open_elements: Vec::new(),
            stack_effect: StackEffect::None,
            seek_count: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> ParserState {
        self.parser_state
    }

    /// Why the document was rejected, or why the last refused call was refused
    pub fn get_last_error(&self) -> Option<&ProcessorError> {
        self.last_error.as_ref()
    }

    /// Names of the elements that are open at the cursor, outermost first
    pub fn open_elements(&self) -> &[String] {
        &self.open_elements
    }

    pub fn get_current_depth(&self) -> usize {
        self.open_elements.len()
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    /// Move to the next opening tag matching `query`.
    ///
    /// Returns false once the document runs out, ends inside a token or turns
    /// out to be invalid.
    pub fn next_tag(&mut self, query: impl Into<TagQuery>) -> bool {
        self.last_query = query.into();
        let sought_match_offset = self.last_query.match_offset();
        let mut already_found = 0;

        while already_found < sought_match_offset {
            if !self.next_token() {
                return false;
            }

            if self.parser_state == ParserState::MatchedTag && self.matches() {
                already_found += 1;
            }
        }

        true
    }

    /// Move past exactly one token
    pub fn next_token(&mut self) -> bool {
        // Keep what was read of a failed token readable
        if self.parser_state.is_finished() {
            return false;
        }

        self.after_token();

        let was_at = self.bytes_already_parsed;
        self.parser_state = ParserState::Ready;

        if was_at >= self.xml.len() {
            self.parser_state = ParserState::Complete;
            return false;
        }

        let lexed = lexer::lex(&self.xml, was_at);
        self.enter_token(lexed, was_at)
    }

    pub fn paused_at_incomplete_token(&self) -> bool {
        self.parser_state == ParserState::IncompleteInput
    }

    fn enter_token(&mut self, lexed: Lexed, was_at: usize) -> bool {
        let state = match lexed {
            Lexed::Text(span) => {
                self.set_token(span, Some(span));
                ParserState::TextNode
            }
            Lexed::Tag(tag) => return self.enter_tag(tag),
            Lexed::PresumptuousTag(token) => {
                self.set_token(token, None);
                ParserState::PresumptuousTag
            }
            Lexed::Comment { token, text } => {
                self.set_token(token, Some(text));
                ParserState::Comment
            }
            Lexed::CData { token, text } => {
                self.set_token(token, Some(text));
                ParserState::CDataNode
            }
            Lexed::Doctype { token, text } => {
                self.set_token(token, Some(text));
                ParserState::Doctype
            }
            Lexed::ProcessingInstruction {
                token,
                target,
                text,
            } => {
                self.set_token(token, Some(text));
                self.tag_name_starts_at = Some(target.start);
                self.tag_name_length = target.length;
                ParserState::PiNode
            }
            Lexed::XmlDeclaration {
                token,
                text,
                attributes,
            } => {
                self.set_token(token, Some(text));
                self.attributes = attributes;
                ParserState::XmlDeclaration
            }
            Lexed::Incomplete => {
                debug!("incomplete token at byte {was_at}");
                self.parser_state = ParserState::IncompleteInput;
                self.bytes_already_parsed = was_at;
                return false;
            }
            Lexed::Invalid { error, partial } => {
                if let Some(tag) = partial {
                    self.token_starts_at = Some(tag.token.start);
                    self.tag_name_starts_at = Some(tag.name.start);
                    self.tag_name_length = tag.name.length;
                    self.is_closing_tag = tag.closing;
                    self.attributes = tag.attributes;
                }
                return self.reject(error);
            }
        };

        self.parser_state = state;
        trace!("{:?} at byte {was_at}", self.parser_state);
        true
    }

    fn set_token(&mut self, token: Span, text: Option<Span>) {
        self.token_starts_at = Some(token.start);
        self.token_length = token.length;
        self.bytes_already_parsed = token.end();
        if let Some(text) = text {
            self.text_starts_at = Some(text.start);
            self.text_length = text.length;
        }
    }

    fn enter_tag(&mut self, tag: TagToken) -> bool {
        self.set_token(tag.token, None);
        self.tag_name_starts_at = Some(tag.name.start);
        self.tag_name_length = tag.name.length;
        self.is_closing_tag = tag.closing;
        self.attributes = tag.attributes;

        let name = tag.name.slice(&self.xml).to_string();
        if tag.closing {
            if self.open_elements.last() != Some(&name) {
                let expected = self.open_elements.last().cloned();
                return self.reject(ProcessorError::MismatchedClosingTag {
                    expected,
                    found: name,
                });
            }
            self.open_elements.pop();
            self.stack_effect = StackEffect::Popped(name);
        } else if !tag.empty {
            self.open_elements.push(name);
            self.stack_effect = StackEffect::Pushed;
        }

        self.parser_state = ParserState::MatchedTag;
        trace!("tag {:?} at byte {}", self.get_tag(), tag.token.start);
        true
    }

    /// Stop on invalid input
    fn reject(&mut self, error: ProcessorError) -> bool {
        warn!("invalid XML: {error}");
        self.parser_state = ParserState::InvalidInput;
        self.last_error = Some(error);
        false
    }

    /// Refuse a call made in the wrong situation
    fn refuse(&mut self, error: ProcessorError) -> bool {
        warn!("{error}");
        self.last_error = Some(error);
        false
    }

    fn matches(&self) -> bool {
        if self.is_closing_tag && !self.last_query.visits_closers() {
            return false;
        }

        match self.last_query.tag_name() {
            Some(sought) => self.get_tag() == Some(sought),
            None => true,
        }
    }

    /// Clear per-token state before moving on
    fn after_token(&mut self) {
        let pending = self.lexical_updates.len() + self.attribute_updates.len();

        if pending > self.config.max_pending_updates {
            self.apply_lexical_updates(0);
        } else {
            // The edits belong to a tag that is being left; they stay queued
            // but no longer answer to an attribute name.
            let updates = mem::take(&mut self.attribute_updates);
            self.lexical_updates
                .extend(updates.into_values().map(AttributeUpdate::into_replacement));
        }

        self.token_starts_at = None;
        self.token_length = 0;
        self.tag_name_starts_at = None;
        self.tag_name_length = 0;
        self.text_starts_at = None;
        self.text_length = 0;
        self.is_closing_tag = false;
        self.attributes.clear();
        self.stack_effect = StackEffect::None;
    }

    /// Revert the current token's push or pop
    fn undo_stack_effect(&mut self) {
        match mem::replace(&mut self.stack_effect, StackEffect::None) {
            StackEffect::None => {}
            StackEffect::Pushed => {
                self.open_elements.pop();
            }
            StackEffect::Popped(name) => self.open_elements.push(name),
        }
    }

    // ========================================================================
    // Token accessors
    // ========================================================================

    /// Name of the current tag, or target of the current processing instruction
    pub fn get_tag(&self) -> Option<&str> {
        let start = self.tag_name_starts_at?;

        match self.parser_state {
            ParserState::MatchedTag | ParserState::PiNode => {
                self.xml.get(start..start + self.tag_name_length)
            }
            _ => None,
        }
    }

    pub fn is_tag_closer(&self) -> bool {
        self.parser_state == ParserState::MatchedTag && self.is_closing_tag
    }

    /// Whether the current tag is self-closing, as in `<br/>`
    pub fn is_empty_element_tag(&self) -> bool {
        if self.parser_state != ParserState::MatchedTag || self.is_closing_tag {
            return false;
        }

        match self.token_starts_at {
            Some(start) => self.xml.as_bytes().get(start + self.token_length - 2) == Some(&b'/'),
            None => false,
        }
    }

    pub fn get_token_type(&self) -> Option<TokenType> {
        match self.parser_state {
            ParserState::MatchedTag => Some(TokenType::Tag),
            ParserState::TextNode => Some(TokenType::Text),
            ParserState::CDataNode => Some(TokenType::CDataSection),
            ParserState::Comment => Some(TokenType::Comment),
            ParserState::XmlDeclaration => Some(TokenType::XmlDeclaration),
            ParserState::PiNode => Some(TokenType::ProcessingInstruction),
            ParserState::Doctype => Some(TokenType::Doctype),
            ParserState::PresumptuousTag => Some(TokenType::PresumptuousTag),
            ParserState::Ready
            | ParserState::Complete
            | ParserState::IncompleteInput
            | ParserState::InvalidInput => None,
        }
    }

    /// Tag name for tags, the token type discriminator for everything else
    pub fn get_token_name(&self) -> Option<&str> {
        match self.get_token_type()? {
            TokenType::Tag => self.get_tag(),
            other => Some(other.as_str()),
        }
    }

    /// Value of attribute `name` on the current tag.
    ///
    /// Queued edits are visible before they are applied. Values are decoded,
    /// except on the XML declaration where they are returned as written.
    /// After invalid input inside a tag, the attributes read before the
    /// failure can still be looked up.
    pub fn get_attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.parser_state {
            ParserState::MatchedTag => {
                if let Some(update) = self.attribute_updates.get(name) {
                    return update.enqueued_value().map(Cow::Borrowed);
                }
            }
            ParserState::XmlDeclaration | ParserState::InvalidInput => {}
            _ => return None,
        }

        let raw = self.find_attribute(name)?.value.slice(&self.xml);
        if self.parser_state == ParserState::XmlDeclaration {
            return Some(Cow::Borrowed(raw));
        }
        Some(decode_attribute(raw))
    }

    /// Names of the current tag's attributes that start with `prefix`,
    /// as found in the document (queued edits are not reflected)
    pub fn get_attribute_names_with_prefix(&self, prefix: &str) -> Option<Vec<&str>> {
        if self.parser_state != ParserState::MatchedTag || self.is_closing_tag {
            return None;
        }

        Some(
            self.attributes
                .iter()
                .map(|a| a.name.as_str())
                .filter(|name| name.starts_with(prefix))
                .collect(),
        )
    }

    /// Text content of the current token.
    ///
    /// Text nodes are decoded; comments, CDATA sections, doctypes,
    /// processing instructions and the XML declaration are returned raw.
    pub fn get_modifiable_text(&self) -> Cow<'_, str> {
        let Some(start) = self.text_starts_at else {
            return Cow::Borrowed("");
        };
        let text = Span::new(start, self.text_length).slice(&self.xml);

        match self.parser_state {
            ParserState::TextNode => decode_text_node(text),
            ParserState::CDataNode
            | ParserState::Comment
            | ParserState::Doctype
            | ParserState::PiNode
            | ParserState::XmlDeclaration => Cow::Borrowed(text),
            _ => Cow::Borrowed(""),
        }
    }

    fn find_attribute(&self, name: &str) -> Option<&AttributeToken> {
        self.attributes.iter().find(|a| a.name == name)
    }

    fn is_on_opening_tag(&self) -> bool {
        self.parser_state == ParserState::MatchedTag && !self.is_closing_tag
    }

    // ========================================================================
    // Attribute edits
    // ========================================================================

    /// Queue `name="value"` on the current opening tag.
    ///
    /// Overwrites an existing attribute in place, otherwise inserts it right
    /// after the tag name. Returns false, queuing nothing, when not on an
    /// opening tag or when the name or value contains a character that would
    /// break the markup.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        if !self.is_on_opening_tag() {
            return self.refuse(ProcessorError::NotOnOpeningTag);
        }

        if let Err(invalid) =
            attributes::validate_name(name).and_then(|()| attributes::validate_value(value))
        {
            return self.refuse(ProcessorError::InvalidAttribute(invalid));
        }

        let update = match self.find_attribute(name) {
            Some(existing) => AttributeUpdate::Replace {
                span: existing.whole,
                name: name.to_string(),
                value: value.to_string(),
            },
            None => AttributeUpdate::Insert {
                at: self.tag_name_starts_at.unwrap_or_default() + self.tag_name_length,
                name: name.to_string(),
                value: value.to_string(),
            },
        };
        self.attribute_updates.insert(name.to_string(), update);

        true
    }

    /// Queue removal of attribute `name` from the current opening tag.
    ///
    /// Returns true if the attribute exists in the document. An attribute
    /// that was only queued by `set_attribute` is dropped from the queue and
    /// false is returned.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        if !self.is_on_opening_tag() {
            return self.refuse(ProcessorError::NotOnOpeningTag);
        }

        let Some(span) = self.find_attribute(name).map(|a| a.whole) else {
            self.attribute_updates.remove(name);
            return false;
        };

        self.attribute_updates
            .insert(name.to_string(), AttributeUpdate::Remove { span });
        true
    }

    // ========================================================================
    // Bookmarks
    // ========================================================================

    /// Remember the current token under `name`
    pub fn set_bookmark(&mut self, name: &str) -> bool {
        let Some(start) = self.token_starts_at.filter(|_| self.parser_state.is_token()) else {
            return self.refuse(ProcessorError::NotOnToken);
        };

        if !self.bookmarks.contains_key(name) && self.bookmarks.len() >= self.config.max_bookmarks
        {
            return self.refuse(ProcessorError::TooManyBookmarks(self.config.max_bookmarks));
        }

        let mut open_elements = self.open_elements.clone();
        match &self.stack_effect {
            StackEffect::None => {}
            StackEffect::Pushed => {
                open_elements.pop();
            }
            StackEffect::Popped(closed) => open_elements.push(closed.clone()),
        }

        self.bookmarks.insert(
            name.to_string(),
            Bookmark {
                span: Span::new(start, self.token_length),
                open_elements,
            },
        );
        true
    }

    pub fn release_bookmark(&mut self, name: &str) -> bool {
        self.bookmarks.remove(name).is_some()
    }

    pub fn has_bookmark(&self, name: &str) -> bool {
        self.bookmarks.contains_key(name)
    }

    /// Move back (or forward) to a bookmarked token and rescan it.
    ///
    /// Queued edits are applied first so the bookmark points into the
    /// current text.
    pub fn seek(&mut self, name: &str) -> bool {
        if !self.bookmarks.contains_key(name) {
            return self.refuse(ProcessorError::UnknownBookmark(name.to_string()));
        }

        self.seek_count += 1;
        if self.seek_count > self.config.max_seek_ops {
            return self.refuse(ProcessorError::TooManySeeks(self.config.max_seek_ops));
        }

        self.get_updated_xml();

        // The flush may have swallowed the bookmarked token
        let Some(bookmark) = self.bookmarks.get(name) else {
            return self.refuse(ProcessorError::UnknownBookmark(name.to_string()));
        };

        self.open_elements = bookmark.open_elements.clone();
        self.bytes_already_parsed = bookmark.span.start;
        self.stack_effect = StackEffect::None;
        self.parser_state = ParserState::Ready;
        self.next_token()
    }

    // ========================================================================
    // Applying edits
    // ========================================================================

    /// Apply every queued edit and return the resulting document.
    ///
    /// The current token is rescanned in the edited text, so its attributes
    /// reflect the edits straight away.
    pub fn get_updated_xml(&mut self) -> &str {
        if self.lexical_updates.is_empty() && self.attribute_updates.is_empty() {
            return &self.xml;
        }

        let before_current_token = self
            .token_starts_at
            .filter(|_| self.parser_state.is_token());
        // A tag rejected halfway still has readable attributes
        let before_partial_tag = self
            .token_starts_at
            .filter(|_| self.parser_state == ParserState::InvalidInput);

        let shift = self.apply_lexical_updates(
            before_current_token.or(before_partial_tag).unwrap_or(0),
        );

        if let Some(start) = before_current_token {
            self.undo_stack_effect();
            self.bytes_already_parsed = shifted(start, shift);
            self.next_token();
        } else if before_partial_tag.is_some() {
            self.shift_partial_tag(shift);
        }

        &self.xml
    }

    /// Move the offsets of a partially read tag along with the buffer.
    ///
    /// Edits are only ever queued on fully matched tags, so all of them lie
    /// before the partial tag and it moves as a whole.
    fn shift_partial_tag(&mut self, shift: isize) {
        self.token_starts_at = self.token_starts_at.map(|start| shifted(start, shift));
        self.tag_name_starts_at = self.tag_name_starts_at.map(|start| shifted(start, shift));
        for attribute in &mut self.attributes {
            attribute.value.start = shifted(attribute.value.start, shift);
            attribute.whole.start = shifted(attribute.whole.start, shift);
        }
    }

    /// Same as `get_updated_xml`
    pub fn get_updated_text(&mut self) -> &str {
        self.get_updated_xml()
    }

    /// Apply all edits and hand back the document
    pub fn into_updated_xml(mut self) -> String {
        self.get_updated_xml();
        self.xml
    }

    /// Rewrite the buffer with every queued edit.
    ///
    /// Shifts the cursor and the bookmarks, and returns how far the offset
    /// `shift_this_point` moved.
    fn apply_lexical_updates(&mut self, shift_this_point: usize) -> isize {
        let mut updates = mem::take(&mut self.lexical_updates);
        updates.extend(
            mem::take(&mut self.attribute_updates)
                .into_values()
                .map(AttributeUpdate::into_replacement),
        );

        if updates.is_empty() {
            return 0;
        }

        // Ties on start only happen for insertions at the same offset; the
        // text breaks them so the output does not depend on queue order.
        updates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.text.cmp(&b.text))
                .then_with(|| a.length.cmp(&b.length))
        });

        let cursor = self.bytes_already_parsed;
        let mut cursor_shift: isize = 0;
        let mut accumulated_shift_for_given_point: isize = 0;
        let mut bytes_already_copied = 0;
        let mut output_buffer = String::with_capacity(self.xml.len());

        for diff in &updates {
            if diff.start < bytes_already_copied {
                warn!("dropping overlapping edit at byte {}", diff.start);
                continue;
            }

            let shift = diff.shift();
            if diff.start < cursor {
                cursor_shift += shift;
            }
            if diff.start <= shift_this_point {
                accumulated_shift_for_given_point += shift;
            }

            output_buffer.push_str(&self.xml[bytes_already_copied..diff.start]);
            output_buffer.push_str(&diff.text);
            bytes_already_copied = diff.end();
        }
        output_buffer.push_str(&self.xml[bytes_already_copied..]);

        self.bookmarks.retain(|bookmark_name, bookmark| {
            let retained = shift_bookmark(&mut bookmark.span, &updates);
            if !retained {
                debug!("bookmark {bookmark_name:?} was inside an edit and is released");
            }
            retained
        });

        debug!(
            "applied {} edits, document is now {} bytes",
            updates.len(),
            output_buffer.len()
        );

        self.xml = output_buffer;
        self.bytes_already_parsed = shifted(cursor, cursor_shift);

        accumulated_shift_for_given_point
    }
}

/// Move a bookmark across a sorted list of applied edits.
///
/// Returns false when an edit covers the whole bookmark.
fn shift_bookmark(span: &mut Span, updates: &[TextReplacement]) -> bool {
    let bookmark_end = span.end();
    let mut head_delta: isize = 0;
    let mut tail_delta: isize = 0;

    for diff in updates {
        if bookmark_end <= diff.start {
            break;
        }

        if span.start >= diff.start && bookmark_end < diff.end() {
            return false;
        }

        let delta = diff.shift();
        if span.start >= diff.start {
            head_delta += delta;
        }
        if bookmark_end >= diff.end() {
            tail_delta += delta;
        }
    }

    let start = shifted(span.start, head_delta);
    let end = shifted(bookmark_end, tail_delta);
    *span = Span::new(start, end.saturating_sub(start));
    true
}

impl From<XmlTagProcessor> for String {
    fn from(processor: XmlTagProcessor) -> Self {
        processor.into_updated_xml()
    }
}
