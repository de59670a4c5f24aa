//! Rewrite Strategies
//!
//! - Sequential: one document, one processor (`rewrite_document`)
//! - Parallel: many documents at once with Rayon

pub mod parallel;
pub mod rewrite;

pub use rewrite::{rewrite_document, RewritePlan, Rewritten};
