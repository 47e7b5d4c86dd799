//! Catalog management service

use std::path::Path;

use crate::{
    collections::{ChainedHashMap, TABLE_SIZE},
    error::AppResult,
    models::{Book, BookId},
    repository::BookFile,
};

/// Resolves whether a borrowable title exists.
///
/// The ledger validates titles through this seam so it can run with or without a catalog.
#[cfg_attr(test, mockall::automock)]
pub trait TitleLookup {
    fn has_title(&self, title: &str) -> bool;
}

/// Book store keyed by id.
///
/// When bound to a catalog file, every successful mutation rewrites that file in full.
#[derive(Debug)]
pub struct Catalog {
    books: ChainedHashMap<BookId, Book>,
    file: Option<BookFile>,
}

impl Catalog {
    /// Empty catalog that never touches the filesystem
    pub fn new() -> Self {
        Self::with_buckets(TABLE_SIZE, None)
    }

    pub fn with_buckets(bucket_count: usize, file: Option<BookFile>) -> Self {
        Self {
            books: ChainedHashMap::with_buckets(bucket_count),
            file,
        }
    }

    /// Empty catalog that auto-saves to `file`. Nothing is read from it.
    pub fn with_file(file: BookFile) -> Self {
        Self::with_buckets(TABLE_SIZE, Some(file))
    }

    /// File the catalog auto-saves to, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_ref().map(BookFile::path)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Add a book. Rejected with a warning (returns false) when `id` is already taken.
    pub fn add_book(
        &mut self,
        id: BookId,
        title: &str,
        author: &str,
        year: i32,
        publisher: Option<&str>,
    ) -> bool {
        if !self.insert_unique(Book::new(id, title, author, year, publisher)) {
            return false;
        }
        tracing::info!("Book added: id={} title={}", id, title);
        self.persist();
        true
    }

    /// Remove a book. Returns false when `id` is unknown.
    pub fn delete_book(&mut self, id: BookId) -> bool {
        if !self.books.remove(&id) {
            tracing::warn!("Cannot delete book id={}: not found", id);
            return false;
        }
        tracing::info!("Book deleted: id={}", id);
        self.persist();
        true
    }

    /// Replace title, author and year. The publisher is left as is.
    pub fn update_book(&mut self, id: BookId, title: &str, author: &str, year: i32) -> bool {
        let Some(book) = self.books.search_mut(&id) else {
            tracing::warn!("Cannot update book id={}: not found", id);
            return false;
        };
        book.title = title.to_string();
        book.author = author.to_string();
        book.year = year;

        tracing::info!("Book updated: id={}", id);
        self.persist();
        true
    }

    pub fn search_book(&self, id: BookId) -> Option<&Book> {
        self.books.search(&id)
    }

    /// Copies of every book whose title contains `term`, ignoring case
    pub fn search_book_by_title(&self, term: &str) -> Vec<Book> {
        self.books
            .iter()
            .filter(|(_, book)| book.title_contains(term))
            .map(|(_, book)| book.clone())
            .collect()
    }

    /// Every `(id, book)` pair, in no particular order
    pub fn all_books(&self) -> Vec<(BookId, &Book)> {
        self.books.iter().map(|(id, book)| (*id, book)).collect()
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().map(|(_, book)| book)
    }

    /// Load books from a catalog file and bind the catalog to it for later auto-saves.
    ///
    /// Rows whose id is already present are skipped. Returns how many books were added.
    /// The file itself is not rewritten by loading.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> AppResult<usize> {
        let file = BookFile::new(path.as_ref());
        let rows = file.read_all()?;
        let total = rows.len();

        let mut loaded = 0;
        for book in rows {
            if self.insert_unique(book) {
                loaded += 1;
            }
        }

        tracing::info!(
            "Loaded {} of {} catalog rows from {}",
            loaded,
            total,
            file.path().display()
        );
        self.file = Some(file);
        Ok(loaded)
    }

    /// Write the whole catalog to `path`
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let file = BookFile::new(path.as_ref());
        file.write_all(self.books())?;
        tracing::info!("Saved {} books to {}", self.len(), file.path().display());
        Ok(())
    }

    fn insert_unique(&mut self, book: Book) -> bool {
        if self.books.contains_key(&book.id) {
            tracing::warn!(
                "Book id={} already exists; ignoring '{}'",
                book.id,
                book.title
            );
            return false;
        }
        self.books.insert(book.id, book);
        true
    }

    /// Auto-save. A failed write is logged and the in-memory catalog stays ahead of the file.
    fn persist(&self) {
        let Some(file) = &self.file else {
            return;
        };
        if let Err(e) = file.write_all(self.books()) {
            tracing::error!("Failed to save catalog to {}: {}", file.path().display(), e);
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// A title resolves when any catalog title contains it, ignoring case
impl TitleLookup for Catalog {
    fn has_title(&self, title: &str) -> bool {
        self.books().any(|book| book.title_contains(title))
    }
}
