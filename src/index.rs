use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A document in the retrieval collection. Tags are informational only and
/// are never indexed. `access_level` is a sensitivity tier, higher = more
/// restricted; 0 is the least-restricted level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub access_level: u32,
}

/// Inverted index mapping term -> doc id -> term frequency across that
/// document's title and body. Inner maps are never empty and every stored
/// frequency is >= 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<String, u32>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Postings for a term: doc id -> frequency. None when the term occurs
    /// in no document.
    pub fn postings(&self, term: &str) -> Option<&HashMap<String, u32>> {
        self.postings.get(term)
    }

    /// Frequency of `term` in `doc_id`, 0 when absent.
    pub fn term_frequency(&self, term: &str, doc_id: &str) -> u32 {
        self.postings
            .get(term)
            .and_then(|by_doc| by_doc.get(doc_id))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }
}

/// Build an inverted index over `documents`.
///
/// Each document contributes the token counts of its title followed by its
/// body; repeated terms accumulate. A term only ever maps to documents it
/// actually occurs in. Duplicate ids overwrite per (term, id) key, so
/// callers must not pass duplicate ids with different content.
pub fn build_index(documents: &[Document]) -> InvertedIndex {
    let mut postings: HashMap<String, HashMap<String, u32>> = HashMap::new();

    for doc in documents {
        let text = format!("{} {}", doc.title, doc.body);
        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in tokenize(&text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        for (term, count) in counts {
            postings.entry(term).or_default().insert(doc.id.clone(), count);
        }
    }

    let index = InvertedIndex { postings };
    tracing::debug!(
        num_docs = documents.len(),
        num_terms = index.term_count(),
        "index built"
    );
    index
}
