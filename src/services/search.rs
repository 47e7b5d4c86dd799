//! Autocomplete and sorting over the catalog

use crate::{
    collections::{merge_sort_by, Trie},
    models::{Book, SortKey},
    services::catalog::Catalog,
};

/// Title autocomplete index plus sort helpers.
///
/// The index only grows: titles of deleted or renamed books stay suggestible until the
/// index is rebuilt from scratch.
#[derive(Debug, Default)]
pub struct SearchIndex {
    trie: Trie,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every catalog title. Safe to call repeatedly. Returns the number of titles seen.
    pub fn load_all_books_to_trie(&mut self, catalog: &Catalog) -> usize {
        let mut count = 0;
        for book in catalog.books() {
            self.add_to_auto_complete(&book.title);
            count += 1;
        }
        tracing::info!("Loaded {} book titles into auto-complete", count);
        count
    }

    /// Insert one title; empty titles are ignored
    pub fn add_to_auto_complete(&mut self, title: &str) {
        if !title.is_empty() {
            self.trie.insert(title);
        }
    }

    /// Suggestions for `prefix`. A prefix with no ASCII character in it (including the empty
    /// one) folds to the trie root, so it yields nothing rather than the whole catalog.
    pub fn auto_complete(&self, prefix: &str) -> Vec<String> {
        if !prefix.chars().any(|c| c.is_ascii()) {
            return Vec::new();
        }
        self.trie.get_auto_complete(prefix)
    }

    /// Number of distinct suggestions the index can produce
    pub fn suggestion_count(&self) -> usize {
        self.trie.len()
    }

    /// Books whose title contains `term` (case-insensitive), borrowed from the catalog
    pub fn search_books_by_title<'a>(&self, catalog: &'a Catalog, term: &str) -> Vec<&'a Book> {
        if term.is_empty() {
            return Vec::new();
        }
        catalog
            .books()
            .filter(|book| book.title_contains(term))
            .collect()
    }

    /// Stable in-place sort on `key`
    pub fn sort_books(books: &mut [&Book], key: SortKey) {
        if books.len() <= 1 {
            return;
        }
        merge_sort_by(books, |a, b| key.compare(a, b));
        tracing::debug!("Sorted {} books by {}", books.len(), key);
    }

    pub fn sort_books_by_title(books: &mut [&Book]) {
        Self::sort_books(books, SortKey::Title);
    }

    pub fn sort_books_by_year(books: &mut [&Book]) {
        Self::sort_books(books, SortKey::Year);
    }

    pub fn sort_books_by_author(books: &mut [&Book]) {
        Self::sort_books(books, SortKey::Author);
    }
}
