//! Book catalog file
//!
//! Plain comma-separated rows `id,title,author,year,publisher` under an
//! `ID,Title,Author,Year,Publisher` header. Fields are not quoted, so a comma inside a
//! title or publisher shifts the columns and the row is rejected (or misread) on load.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{
    error::{AppError, AppResult},
    models::{Book, DEFAULT_PUBLISHER},
    repository::decoded_lines,
};

pub const CATALOG_HEADER: &str = "ID,Title,Author,Year,Publisher";

#[derive(Debug, Clone)]
pub struct BookFile {
    path: PathBuf,
}

impl BookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every well-formed row.
    ///
    /// A missing file is an empty catalog. Malformed rows are logged and skipped.
    pub fn read_all(&self) -> AppResult<Vec<Book>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Catalog file {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut books = Vec::new();
        for (line_no, line) in decoded_lines(&bytes) {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Skipping catalog row in {}: {}", self.path.display(), e);
                    continue;
                }
            };
            if line.trim().is_empty() || (line_no == 1 && is_header(line)) {
                continue;
            }
            match parse_book_row(line, line_no) {
                Ok(book) => books.push(book),
                Err(e) => tracing::warn!("Skipping catalog row in {}: {}", self.path.display(), e),
            }
        }
        Ok(books)
    }

    /// Rewrite the whole file: header, then one row per book.
    ///
    /// Rows go to a temporary file in the same directory which then replaces the target,
    /// so a crash mid-write leaves the previous catalog intact.
    pub fn write_all<'a>(&self, books: impl IntoIterator<Item = &'a Book>) -> AppResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            writeln!(writer, "{}", CATALOG_HEADER)?;
            for book in books {
                writeln!(writer, "{}", format_book_row(book))?;
            }
            writer.flush()?;
        }
        tmp.persist(&self.path)?;
        Ok(())
    }
}

fn is_header(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(CATALOG_HEADER)
}

/// Parse one data row. `line_no` is 1-based and only used for diagnostics.
pub fn parse_book_row(line: &str, line_no: usize) -> AppResult<Book> {
    let mut fields = line.split(',');
    let mut next_field = |name: &str| {
        fields
            .next()
            .ok_or_else(|| AppError::parse(line_no, format!("missing {} column", name)))
    };

    let id_field = next_field("id")?;
    let title = next_field("title")?;
    let author = next_field("author")?;
    let year_field = next_field("year")?;
    let publisher = fields.next().map(str::trim).filter(|p| !p.is_empty());

    let id = id_field
        .trim()
        .parse()
        .map_err(|_| AppError::parse(line_no, format!("invalid id '{}'", id_field)))?;
    let year = year_field
        .trim()
        .parse()
        .map_err(|_| AppError::parse(line_no, format!("invalid year '{}'", year_field)))?;

    Ok(Book::new(
        id,
        title,
        author,
        year,
        Some(publisher.unwrap_or(DEFAULT_PUBLISHER)),
    ))
}

pub fn format_book_row(book: &Book) -> String {
    format!(
        "{},{},{},{},{}",
        book.id, book.title, book.author, book.year, book.publisher
    )
}
