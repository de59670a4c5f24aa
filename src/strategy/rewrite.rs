//! Whole-document rewrites
//!
//! A `RewritePlan` is a query plus the attribute edits to make on every tag
//! it matches. `rewrite_document` runs one processor over a document,
//! applies the plan and flushes once at the end.

use log::debug;

use crate::core::attributes;
use crate::core::{ProcessorConfig, ProcessorError, TagQuery, XmlTagProcessor};

/// Attribute edits to apply to every tag matching `query`
#[derive(Debug, Clone, Default)]
pub struct RewritePlan {
    pub query: TagQuery,
    /// `(name, value)` pairs, applied in order
    pub set: Vec<(String, String)>,
    /// Attribute names to remove, applied after `set`
    pub remove: Vec<String>,
    pub config: ProcessorConfig,
}

impl RewritePlan {
    pub fn new(query: impl Into<TagQuery>) -> Self {
        RewritePlan {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn set_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set.push((name.into(), value.into()));
        self
    }

    pub fn remove_attribute(mut self, name: impl Into<String>) -> Self {
        self.remove.push(name.into());
        self
    }

    /// Check every queued name and value up front, so a plan either applies
    /// everywhere or nowhere
    pub fn validate(&self) -> Result<(), ProcessorError> {
        for (name, value) in &self.set {
            attributes::validate_name(name)
                .and_then(|()| attributes::validate_value(value))
                .map_err(ProcessorError::InvalidAttribute)?;
        }
        Ok(())
    }
}

/// Result of a successful rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub xml: String,
    /// Opening tags the plan was applied to
    pub matched: usize,
    /// The document ended inside a token; everything before it was rewritten
    pub incomplete: bool,
}

/// Apply `plan` to every matching tag of `xml`.
///
/// Fails if the plan is invalid or the document breaks a lexical rule.
pub fn rewrite_document(xml: &str, plan: &RewritePlan) -> Result<Rewritten, ProcessorError> {
    plan.validate()?;

    let mut processor = XmlTagProcessor::with_config(xml, plan.config);
    let mut matched = 0;

    while processor.next_tag(plan.query.clone()) {
        if processor.is_tag_closer() {
            continue;
        }

        matched += 1;
        for (name, value) in &plan.set {
            processor.set_attribute(name, value);
        }
        for name in &plan.remove {
            processor.remove_attribute(name);
        }
    }

    if let Some(error) = processor.get_last_error().filter(|e| e.is_invalid_input()) {
        return Err(error.clone());
    }

    let incomplete = processor.paused_at_incomplete_token();
    debug!("rewrote {matched} tags (incomplete: {incomplete})");

    Ok(Rewritten {
        xml: processor.into_updated_xml(),
        matched,
        incomplete,
    })
}
