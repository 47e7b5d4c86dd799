//! Catalog, search and ledger services

pub mod catalog;
pub mod ledger;
pub mod search;

pub use catalog::{Catalog, TitleLookup};
pub use ledger::Ledger;
pub use search::SearchIndex;

use crate::{
    config::AppConfig,
    models::{Book, BookId, SortKey},
    repository::Repository,
};

/// The three services wired together the way a front end drives them.
///
/// The catalog is the source of truth for books. The search index is filled from it at open
/// time and kept current by [`Library::add_book`]. The ledger checks borrowed titles
/// against the catalog.
#[derive(Debug)]
pub struct Library {
    pub catalog: Catalog,
    pub search: SearchIndex,
    pub ledger: Ledger,
}

impl Library {
    /// Open both files named by the configuration. Read failures are logged and leave the
    /// affected service empty.
    pub fn open(config: &AppConfig) -> Self {
        let repository = Repository::new(&config.storage);
        let buckets = config.catalog.bucket_count;

        let mut catalog = Catalog::with_buckets(buckets, None);
        if let Err(e) = catalog.load_from_file(repository.books.path()) {
            tracing::error!(
                "Failed to load catalog from {}: {}",
                repository.books.path().display(),
                e
            );
        }

        let mut search = SearchIndex::new();
        search.load_all_books_to_trie(&catalog);

        let ledger = Ledger::open_with_buckets(buckets, repository.borrow_records);

        Self {
            catalog,
            search,
            ledger,
        }
    }

    /// Library with no files behind it
    pub fn in_memory() -> Self {
        Self {
            catalog: Catalog::new(),
            search: SearchIndex::new(),
            ledger: Ledger::new(),
        }
    }

    /// Add to the catalog and, on success, to autocomplete
    pub fn add_book(
        &mut self,
        id: BookId,
        title: &str,
        author: &str,
        year: i32,
        publisher: Option<&str>,
    ) -> bool {
        let added = self.catalog.add_book(id, title, author, year, publisher);
        if added {
            self.search.add_to_auto_complete(title);
        }
        added
    }

    pub fn borrow_book(&mut self, user: &str, title: &str, date: &str) -> bool {
        self.ledger
            .borrow_book(Some(&self.catalog), user, title, date)
    }

    pub fn return_book(&mut self, user: &str, title: &str, date: &str) -> bool {
        self.ledger.return_book(user, title, date)
    }

    pub fn auto_complete(&self, prefix: &str) -> Vec<String> {
        self.search.auto_complete(prefix)
    }

    pub fn search_books_by_title(&self, term: &str) -> Vec<&Book> {
        self.search.search_books_by_title(&self.catalog, term)
    }

    /// Every book, ordered by `key`
    pub fn sorted_books(&self, key: SortKey) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.catalog.books().collect();
        SearchIndex::sort_books(&mut books, key);
        books
    }
}
