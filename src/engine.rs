use crate::index::{build_index, Document, InvertedIndex};
use crate::search::{search, AccessContext, SearchResult};
use parking_lot::RwLock;

/// Query-facing service owning a document collection and its inverted index.
///
/// Reads (`search`, `document`, counts) take the shared lock and may run
/// concurrently; `load` takes the exclusive lock, so a rebuild never
/// interleaves with a reader. The index is always rebuilt wholesale from the
/// supplied collection.
#[derive(Default)]
pub struct ContextEngine {
    state: RwLock<EngineState>,
}

#[derive(Default)]
struct EngineState {
    documents: Vec<Document>,
    index: InvertedIndex,
}

impl ContextEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine already loaded with `documents`.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let engine = Self::new();
        engine.load(documents);
        engine
    }

    /// Replace the collection and rebuild the index from scratch.
    pub fn load(&self, documents: Vec<Document>) {
        let mut state = self.state.write();
        state.index = build_index(&documents);
        tracing::info!(
            num_docs = documents.len(),
            num_terms = state.index.term_count(),
            "collection loaded"
        );
        state.documents = documents;
    }

    /// Ranked, access-filtered search over the loaded collection.
    pub fn search(
        &self,
        query: &str,
        max_results: usize,
        access: AccessContext,
    ) -> Vec<SearchResult> {
        let state = self.state.read();
        search(&state.index, &state.documents, query, max_results, access)
    }

    /// Look up a document by id.
    pub fn document(&self, id: &str) -> Option<Document> {
        let state = self.state.read();
        state.documents.iter().find(|d| d.id == id).cloned()
    }

    pub fn doc_count(&self) -> usize {
        self.state.read().documents.len()
    }

    pub fn term_count(&self) -> usize {
        self.state.read().index.term_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str, body: &str, access_level: u32) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            tags: Vec::new(),
            access_level,
        }
    }

    #[test]
    fn empty_engine_answers_with_nothing() {
        let engine = ContextEngine::new();
        assert_eq!(engine.doc_count(), 0);
        assert!(engine.search("anything", 10, AccessContext::Unrestricted).is_empty());
        assert!(engine.document("missing").is_none());
    }

    #[test]
    fn load_indexes_the_collection() {
        let engine = ContextEngine::with_documents(vec![
            doc("a", "rust search", "inverted index", 0),
            doc("b", "python notes", "scripting", 0),
        ]);
        assert_eq!(engine.doc_count(), 2);
        let results = engine.search("rust", 10, AccessContext::Unrestricted);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, "a");
    }

    #[test]
    fn reload_replaces_the_collection_wholesale() {
        let engine = ContextEngine::with_documents(vec![doc("old", "legacy term", "", 0)]);
        assert!(!engine.search("legacy", 10, AccessContext::Unrestricted).is_empty());

        engine.load(vec![doc("new", "fresh term", "", 0)]);
        assert!(engine.search("legacy", 10, AccessContext::Unrestricted).is_empty());
        assert_eq!(engine.search("fresh", 10, AccessContext::Unrestricted)[0].doc_id, "new");
        assert!(engine.document("old").is_none());
        assert!(engine.document("new").is_some());
    }

    #[test]
    fn document_lookup_returns_a_clone() {
        let engine = ContextEngine::with_documents(vec![doc("a", "title", "body", 2)]);
        let found = engine.document("a").unwrap();
        assert_eq!(found.access_level, 2);
        assert_eq!(found.title, "title");
    }

    #[test]
    fn concurrent_readers_share_the_engine() {
        use std::sync::Arc;

        let engine = Arc::new(ContextEngine::with_documents(vec![
            doc("a", "shared corpus", "concurrent reads", 0),
        ]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    engine.search("shared", 10, AccessContext::Unrestricted).len()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }
}
