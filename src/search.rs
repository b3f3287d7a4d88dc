use crate::index::{Document, InvertedIndex};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Conventional result cap when the caller has no preference.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// A scored search hit; higher scores rank first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub doc_id: String,
    pub score: f64,
}

/// Access restriction applied to a search.
///
/// `Unrestricted` admits every document regardless of its access level.
/// `Level(l)` admits documents with `access_level <= l`; the check is a
/// numeric comparison, so level-0 documents are admitted by every context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessContext {
    #[default]
    Unrestricted,
    Level(u32),
}

impl AccessContext {
    /// Whether a document at `access_level` is visible under this context.
    pub fn allows(self, access_level: u32) -> bool {
        match self {
            AccessContext::Unrestricted => true,
            AccessContext::Level(max) => access_level <= max,
        }
    }
}

impl From<Option<u32>> for AccessContext {
    fn from(level: Option<u32>) -> Self {
        match level {
            Some(l) => AccessContext::Level(l),
            None => AccessContext::Unrestricted,
        }
    }
}

/// Rank documents against `query` by summed term frequency.
///
/// Scores accumulate over every query token present in the index; documents
/// matching no token are omitted entirely. Under a `Level` restriction a
/// candidate survives only if it appears in `documents` with a low enough
/// access level; an id the lookup cannot resolve has no provable clearance
/// and is excluded. Results sort by score descending, then doc id ascending,
/// truncated to `max_results`.
pub fn search(
    index: &InvertedIndex,
    documents: &[Document],
    query: &str,
    max_results: usize,
    access: AccessContext,
) -> Vec<SearchResult> {
    if max_results == 0 {
        return Vec::new();
    }

    let by_id: HashMap<&str, &Document> =
        documents.iter().map(|d| (d.id.as_str(), d)).collect();

    let mut scores: HashMap<&str, u64> = HashMap::new();
    for token in tokenize(query) {
        if let Some(postings) = index.postings(&token) {
            for (doc_id, freq) in postings {
                *scores.entry(doc_id.as_str()).or_insert(0) += u64::from(*freq);
            }
        }
    }

    let mut scored: Vec<(&str, u64)> = scores
        .into_iter()
        .filter(|(doc_id, _)| match access {
            AccessContext::Unrestricted => true,
            AccessContext::Level(_) => by_id
                .get(doc_id)
                .is_some_and(|doc| access.allows(doc.access_level)),
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored.truncate(max_results);

    let results: Vec<SearchResult> = scored
        .into_iter()
        .map(|(doc_id, score)| SearchResult {
            doc_id: doc_id.to_string(),
            score: score as f64,
        })
        .collect();
    tracing::debug!(query, hits = results.len(), "search complete");
    results
}
