//! Append-only borrow record file
//!
//! One `user,title,date,action` row per borrow or return, no header. The file is only
//! ever appended to; on startup it is replayed from the top.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::HistoryRecord,
    repository::decoded_lines,
};

#[derive(Debug, Clone)]
pub struct BorrowRecordFile {
    path: PathBuf,
}

impl BorrowRecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single row, creating the file (and its directory) when needed
    pub fn append(&self, record: &HistoryRecord) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record)?;
        Ok(())
    }

    /// Read every well-formed row in file order. A missing file has no records.
    pub fn read_all(&self) -> AppResult<Vec<HistoryRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (line_no, line) in decoded_lines(&bytes) {
            let parsed = line.and_then(|line| match line {
                "" => Ok(None),
                line => parse_record_row(line, line_no).map(Some),
            });
            match parsed {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    "Skipping borrow record in {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }
}

/// Parse `user,title,date,action`. Columns past the fourth are ignored.
pub fn parse_record_row(line: &str, line_no: usize) -> AppResult<HistoryRecord> {
    let fields: Vec<&str> = line.split(',').collect();
    let [user, title, date, action, ..] = fields.as_slice() else {
        return Err(AppError::parse(
            line_no,
            format!("expected 4 columns, found {}", fields.len()),
        ));
    };

    let action = action
        .trim()
        .parse()
        .map_err(|e: AppError| AppError::parse(line_no, e.to_string()))?;

    Ok(HistoryRecord::new(*user, *title, *date, action))
}
