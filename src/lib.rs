//! XmlTagProcessor - streaming XML tokenizer with in-place attribute edits
//!
//! Surfaces:
//! A: Per-document processor resource (new, next_tag, set_attribute, ...)
//! B: Parallel batch rewrites (rewrite_parallel)

// The Rust API is wider than the NIF surface
#![allow(dead_code)]

use rustler::{Encoder, Env, NifResult, ResourceArc, Term};

mod core;
mod resource;
mod strategy;
mod term;

use crate::core::XmlTagProcessor;
use resource::{TagProcessorRef, TagProcessorResource};
use strategy::RewritePlan;
use term::{
    decode_query, error_to_term, optional_binary, optional_binary_list, rewrites_to_term,
    str_to_binary,
};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Lock the processor behind `processor` and run `f`
fn with_processor<R>(
    processor: &TagProcessorRef,
    f: impl FnOnce(&mut XmlTagProcessor) -> R,
) -> NifResult<R> {
    processor
        .with_processor(f)
        .map_err(rustler::Error::RaiseAtom)
}

// ============================================================================
// Scanning
// ============================================================================

/// Create a processor over a document
#[rustler::nif]
fn new(xml: String) -> TagProcessorRef {
    ResourceArc::new(TagProcessorResource::new(xml))
}

#[rustler::nif]
fn next_token(processor: TagProcessorRef) -> NifResult<bool> {
    with_processor(&processor, |p| p.next_token())
}

/// Advance to the next tag matching `query` (nil, a name, or a query map)
#[rustler::nif]
fn next_tag<'a>(processor: TagProcessorRef, query: Term<'a>) -> NifResult<bool> {
    let query = decode_query(query)?;
    with_processor(&processor, |p| p.next_tag(query))
}

#[rustler::nif]
fn paused_at_incomplete_token(processor: TagProcessorRef) -> NifResult<bool> {
    with_processor(&processor, |p| p.paused_at_incomplete_token())
}

// ============================================================================
// Token accessors
// ============================================================================

#[rustler::nif]
fn get_tag<'a>(env: Env<'a>, processor: TagProcessorRef) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| optional_binary(env, p.get_tag()))
}

#[rustler::nif]
fn is_tag_closer(processor: TagProcessorRef) -> NifResult<bool> {
    with_processor(&processor, |p| p.is_tag_closer())
}

#[rustler::nif]
fn is_empty_element_tag(processor: TagProcessorRef) -> NifResult<bool> {
    with_processor(&processor, |p| p.is_empty_element_tag())
}

#[rustler::nif]
fn get_token_type<'a>(env: Env<'a>, processor: TagProcessorRef) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| {
        optional_binary(env, p.get_token_type().map(|t| t.as_str()))
    })
}

#[rustler::nif]
fn get_token_name<'a>(env: Env<'a>, processor: TagProcessorRef) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| optional_binary(env, p.get_token_name()))
}

#[rustler::nif]
fn get_attribute<'a>(env: Env<'a>, processor: TagProcessorRef, name: &str) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| {
        optional_binary(env, p.get_attribute(name).as_deref())
    })
}

#[rustler::nif]
fn get_attribute_names_with_prefix<'a>(
    env: Env<'a>,
    processor: TagProcessorRef,
    prefix: &str,
) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| {
        optional_binary_list(env, p.get_attribute_names_with_prefix(prefix))
    })
}

#[rustler::nif]
fn get_modifiable_text<'a>(env: Env<'a>, processor: TagProcessorRef) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| {
        str_to_binary(env, &p.get_modifiable_text())
    })
}

/// Message of the last rejection, or nil
#[rustler::nif]
fn get_last_error<'a>(env: Env<'a>, processor: TagProcessorRef) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| {
        let message = p.get_last_error().map(|e| e.to_string());
        optional_binary(env, message.as_deref())
    })
}

// ============================================================================
// Attribute edits
// ============================================================================

/// Queue `name="value"` on the current tag. Values that are not binaries
/// are refused.
#[rustler::nif]
fn set_attribute<'a>(processor: TagProcessorRef, name: &str, value: Term<'a>) -> NifResult<bool> {
    if !value.is_binary() {
        log::warn!("set_attribute({name:?}) refused a non-binary value");
        return Ok(false);
    }
    let value: &str = value.decode()?;
    with_processor(&processor, |p| p.set_attribute(name, value))
}

#[rustler::nif]
fn remove_attribute(processor: TagProcessorRef, name: &str) -> NifResult<bool> {
    with_processor(&processor, |p| p.remove_attribute(name))
}

/// Flush queued edits and return the document
#[rustler::nif]
fn get_updated_xml<'a>(env: Env<'a>, processor: TagProcessorRef) -> NifResult<Term<'a>> {
    with_processor(&processor, |p| str_to_binary(env, p.get_updated_xml()))
}

// ============================================================================
// Bookmarks
// ============================================================================

#[rustler::nif]
fn set_bookmark(processor: TagProcessorRef, name: &str) -> NifResult<bool> {
    with_processor(&processor, |p| p.set_bookmark(name))
}

#[rustler::nif]
fn release_bookmark(processor: TagProcessorRef, name: &str) -> NifResult<bool> {
    with_processor(&processor, |p| p.release_bookmark(name))
}

#[rustler::nif]
fn has_bookmark(processor: TagProcessorRef, name: &str) -> NifResult<bool> {
    with_processor(&processor, |p| p.has_bookmark(name))
}

#[rustler::nif]
fn seek(processor: TagProcessorRef, name: &str) -> NifResult<bool> {
    with_processor(&processor, |p| p.seek(name))
}

// ============================================================================
// Parallel rewrites
// ============================================================================

/// Apply the same attribute edits to many documents in parallel.
///
/// Returns `{:ok, [{:ok, xml} | {:error, reason}]}`, or `{:error, reason}`
/// when an edit would produce invalid markup.
#[rustler::nif(schedule = "DirtyCpu")]
fn rewrite_parallel<'a>(
    env: Env<'a>,
    documents: Vec<String>,
    query: Term<'a>,
    set: Vec<(String, String)>,
    remove: Vec<String>,
) -> NifResult<Term<'a>> {
    let plan = RewritePlan {
        query: decode_query(query)?,
        set,
        remove,
        ..Default::default()
    };

    match strategy::parallel::rewrite_documents_parallel(&documents, &plan) {
        Ok(results) => Ok((term::ok(), rewrites_to_term(env, results)).encode(env)),
        Err(err) => Ok(error_to_term(env, &err)),
    }
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.XmlTagProcessor.Native");
