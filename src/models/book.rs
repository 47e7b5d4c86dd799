//! Book model and sort keys

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Externally assigned primary key of a book
pub type BookId = i32;

/// Publisher used when a record does not name one
pub const DEFAULT_PUBLISHER: &str = "Unknown";

/// Catalog record. `id` never changes once the book is in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub publisher: String,
}

impl Book {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        publisher: Option<&str>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            publisher: publisher.unwrap_or(DEFAULT_PUBLISHER).to_string(),
        }
    }

    /// Case-insensitive substring match on the title
    pub fn title_contains(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Field used to order a list of books
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Year,
    Author,
}

impl SortKey {
    /// Compare two books on this key only. Title and author compare byte-wise, so uppercase
    /// sorts before lowercase.
    pub fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::Author => a.author.cmp(&b.author),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Title => "title",
            SortKey::Year => "year",
            SortKey::Author => "author",
        };
        write!(f, "{}", name)
    }
}
