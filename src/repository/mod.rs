//! Repository layer for the flat files behind the catalog and the ledger

pub mod books;
pub mod borrow_records;

pub use books::BookFile;
pub use borrow_records::BorrowRecordFile;

use std::str;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

/// Both persisted files, located from configuration
#[derive(Debug, Clone)]
pub struct Repository {
    pub books: BookFile,
    pub borrow_records: BorrowRecordFile,
}

impl Repository {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            books: BookFile::new(&storage.catalog_file),
            borrow_records: BorrowRecordFile::new(&storage.borrow_records_file),
        }
    }
}

/// Split raw file bytes into 1-based numbered lines with any trailing `\r` removed.
///
/// Each line is decoded on its own, so a stray non-UTF-8 byte only costs the line it is on.
pub(crate) fn decoded_lines(
    bytes: &[u8],
) -> impl Iterator<Item = (usize, AppResult<&str>)> + '_ {
    bytes.split(|&b| b == b'\n').enumerate().map(|(index, raw)| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = str::from_utf8(raw)
            .map_err(|e| AppError::parse(index + 1, format!("invalid UTF-8: {}", e)));
        (index + 1, line)
    })
}
