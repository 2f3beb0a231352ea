//! # Document Matching
//!
//! Greedy, single-pass assignment of verified documents to requirements.
//!
//! Requirements are visited in evaluation order. Each takes the first
//! unconsumed verified document, in input order, that either links to it
//! explicitly or, being unlinked, has an accepted type. The document is
//! then consumed and can satisfy nothing else.
//!
//! This is not an optimal bipartite matching. If one document could
//! satisfy two requirements and only one of them has no alternative, the
//! outcome depends on which requirement is visited first. Evaluation order
//! is fully deterministic, so the outcome is too.

use crate::document::Document;
use crate::requirement::RequirementDefinition;

/// Whether `document` can satisfy `requirement`, ignoring verification.
pub fn document_matches(document: &Document, requirement: &RequirementDefinition) -> bool {
    match &document.requirement_code {
        Some(code) => *code == requirement.code,
        None => requirement.accepts(document.document_type),
    }
}

/// Assign documents to `requirements` (already in evaluation order).
///
/// Returns one slot per requirement holding the document that satisfied
/// it, if any. No document appears in more than one slot.
pub fn assign_documents<'d>(
    requirements: &[&RequirementDefinition],
    documents: &'d [Document],
) -> Vec<Option<&'d Document>> {
    let mut pool: Vec<&'d Document> = documents.iter().filter(|d| d.is_verified()).collect();

    requirements
        .iter()
        .map(|requirement| {
            let position = pool.iter().position(|d| document_matches(d, requirement))?;
            let document = pool.remove(position);
            tracing::debug!(
                code = %requirement.code,
                document = %document.id,
                "requirement satisfied"
            );
            Some(document)
        })
        .collect()
}
