//! Parallel rewrites
//!
//! Uses Rayon to run one processor per document. Processors share nothing,
//! so documents are independent work items.

use rayon::prelude::*;

use super::rewrite::{rewrite_document, RewritePlan, Rewritten};
use crate::core::ProcessorError;

/// Apply `plan` to every document in parallel.
///
/// An invalid plan fails the whole batch; an invalid document only fails
/// its own slot.
pub fn rewrite_documents_parallel<S: AsRef<str> + Sync>(
    documents: &[S],
    plan: &RewritePlan,
) -> Result<Vec<Result<Rewritten, ProcessorError>>, ProcessorError> {
    plan.validate()?;

    Ok(documents
        .par_iter()
        .map(|xml| rewrite_document(xml.as_ref(), plan))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TagQuery;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parallel_rewrite() {
        let documents = ["<a/>", "<b/><a/>", "<a></b>"];
        let plan = RewritePlan::new("a").set_attribute("seen", "yes");

        let results = rewrite_documents_parallel(&documents, &plan).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().xml, r#"<a seen="yes"/>"#);
        assert_eq!(results[1].as_ref().unwrap().xml, r#"<b/><a seen="yes"/>"#);
        assert!(results[2].is_err());
    }

    #[test]
    fn test_invalid_plan_fails_batch() {
        let plan = RewritePlan::new(TagQuery::Any).set_attribute("a", "<");
        assert!(rewrite_documents_parallel(&["<a/>"], &plan).is_err());
    }
}
