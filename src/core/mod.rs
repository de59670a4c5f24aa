//! Core XML tag processing
//!
//! This module contains the building blocks of the tag processor:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Unicode: XML 1.0 Name character classes
//! - Lexer: recognizes one token at a time as spans into the document
//! - Entities: XML entity decoding with Cow (zero-copy when possible)
//! - Attributes: attribute tokens and write-side validation
//! - Processor: the stateful cursor, edit queue and bookmarks

pub mod attributes;
pub mod config;
pub mod entities;
pub mod error;
mod lexer;
pub mod processor;
pub mod query;
pub mod scanner;
pub mod span;
pub mod unicode;

pub use config::ProcessorConfig;
pub use error::ProcessorError;
pub use processor::{ParserState, TokenType, XmlTagProcessor};
pub use query::TagQuery;
pub use span::{Span, TextReplacement};
