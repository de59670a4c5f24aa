//! Elixir Term Conversion Utilities
//!
//! Decodes queries and rewrite plans from Elixir terms, and encodes processor
//! results back.

use rustler::types::atom::{self, Atom};
use rustler::{Encoder, Env, Error, NewBinary, NifResult, Term};

use crate::core::{ProcessorError, TagQuery};
use crate::strategy::Rewritten;

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
    tag_name,
    match_offset,
    tag_closers,
    visit,
}

/// Decode a `next_tag` query.
///
/// Accepts `nil` (any tag), a binary (tag name) or a map with any of
/// `:tag_name`, `:match_offset` and `tag_closers: :visit`.
pub fn decode_query(term: Term<'_>) -> NifResult<TagQuery> {
    if let Ok(query_atom) = term.decode::<Atom>() {
        if query_atom == atom::nil() {
            return Ok(TagQuery::Any);
        }
        return Err(Error::BadArg);
    }

    if term.is_binary() {
        return Ok(TagQuery::ByName(term.decode::<String>()?));
    }

    if !term.is_map() {
        return Err(Error::BadArg);
    }

    let mut query = TagQuery::filter();

    if let Ok(name) = term.map_get(tag_name()) {
        if let Ok(name) = name.decode::<String>() {
            query = query.with_tag_name(name);
        }
    }

    if let Ok(offset) = term.map_get(match_offset()) {
        if let Ok(offset) = offset.decode::<usize>() {
            query = query.with_match_offset(offset);
        }
    }

    if let Ok(closers) = term.map_get(tag_closers()) {
        if closers.decode::<Atom>().is_ok_and(|a| a == visit()) {
            query = query.visiting_closers();
        }
    }

    Ok(query)
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}

/// A binary, or `nil` when absent
pub fn optional_binary<'a>(env: Env<'a>, s: Option<&str>) -> Term<'a> {
    match s {
        Some(s) => str_to_binary(env, s),
        None => atom::nil().encode(env),
    }
}

/// A list of binaries, or `nil` when absent
pub fn optional_binary_list<'a>(env: Env<'a>, names: Option<Vec<&str>>) -> Term<'a> {
    let Some(names) = names else {
        return atom::nil().encode(env);
    };

    let mut list = Term::list_new_empty(env);
    for name in names.into_iter().rev() {
        list = list.list_prepend(str_to_binary(env, name));
    }
    list
}

/// `{:error, message}`
pub fn error_to_term<'a>(env: Env<'a>, err: &ProcessorError) -> Term<'a> {
    (error(), str_to_binary(env, &err.to_string())).encode(env)
}

/// `{:ok, xml}` or `{:error, message}` per document
pub fn rewrites_to_term<'a>(env: Env<'a>, results: Vec<Result<Rewritten, ProcessorError>>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for result in results.into_iter().rev() {
        let term = match result {
            Ok(rewritten) => (ok(), str_to_binary(env, &rewritten.xml)).encode(env),
            Err(err) => error_to_term(env, &err),
        };
        list = list.list_prepend(term);
    }
    list
}
