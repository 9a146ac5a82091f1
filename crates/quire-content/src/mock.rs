//! Mock content store for testing.
//!
//! Provides [`MockContentStore`] for unit testing without filesystem access.

use std::collections::BTreeMap;

use crate::entry::{ContentEntry, DOCS_COLLECTION};
use crate::store::{ContentError, ContentStore};

const COLLECTION_PATH: &str = "src/content/docs";

/// In-memory content store.
///
/// # Example
///
/// ```ignore
/// use quire_content::{ContentStore, MockContentStore};
///
/// let store = MockContentStore::new()
///     .with_markdown("guides/intro.md", "---\ntitle: Intro\n---\n## Setup");
///
/// let entry = store.get("docs", "guides/intro").unwrap().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockContentStore {
    collections: BTreeMap<String, Vec<ContentEntry>>,
}

impl MockContentStore {
    /// Create a store with an empty docs collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: BTreeMap::from([(DOCS_COLLECTION.to_owned(), Vec::new())]),
        }
    }

    /// Add a prebuilt entry to its collection.
    #[must_use]
    pub fn with_entry(mut self, entry: ContentEntry) -> Self {
        let entries = self.collections.entry(entry.collection.clone()).or_default();
        entries.retain(|e| e.id != entry.id);
        entries.push(entry);
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        self
    }

    /// Parse a markdown source into a docs entry.
    ///
    /// `rel_path` is relative to `src/content/docs`.
    ///
    /// # Panics
    ///
    /// Panics if the frontmatter is malformed.
    #[must_use]
    pub fn with_markdown(self, rel_path: &str, source: &str) -> Self {
        let entry = ContentEntry::parse(DOCS_COLLECTION, COLLECTION_PATH, rel_path, source)
            .unwrap_or_else(|e| panic!("invalid mock entry {rel_path}: {e}"));
        self.with_entry(entry)
    }
}

impl ContentStore for MockContentStore {
    fn entries(&self, collection: &str) -> Result<&[ContentEntry], ContentError> {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .ok_or_else(|| ContentError::unknown_collection(collection).with_backend("Mock"))
    }
}
