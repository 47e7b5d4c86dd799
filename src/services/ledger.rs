//! Borrow/return ledger
//!
//! Two indexes track active borrows from both sides (user → titles, title → users) and a
//! history log keeps every borrow and return in order. Each accepted borrow and every
//! return is appended to the borrow record file; the file is never rewritten, and replaying
//! it rebuilds the indexes.
//!
//! A title has a single copy: while anyone holds it, nobody else can borrow it.

use std::path::Path;

use chrono::Local;

use crate::{
    collections::{ChainedHashMap, TABLE_SIZE},
    error::AppResult,
    models::{HistoryRecord, LoanAction, LoanEntry},
    repository::BorrowRecordFile,
    services::catalog::TitleLookup,
};

type LoanIndex = ChainedHashMap<String, Vec<LoanEntry>>;

#[derive(Debug)]
pub struct Ledger {
    by_user: LoanIndex,
    by_title: LoanIndex,
    history: Vec<HistoryRecord>,
    records: Option<BorrowRecordFile>,
}

impl Ledger {
    /// In-memory ledger with no record file
    pub fn new() -> Self {
        Self::with_buckets(TABLE_SIZE, None)
    }

    /// Empty ledger appending to `records`. The file is not replayed.
    pub fn with_buckets(bucket_count: usize, records: Option<BorrowRecordFile>) -> Self {
        Self {
            by_user: ChainedHashMap::with_buckets(bucket_count),
            by_title: ChainedHashMap::with_buckets(bucket_count),
            history: Vec::new(),
            records,
        }
    }

    /// Ledger bound to `records`, rebuilt by replaying it. A file that cannot be read is
    /// logged and leaves the ledger empty.
    pub fn open(records: BorrowRecordFile) -> Self {
        Self::open_with_buckets(TABLE_SIZE, records)
    }

    pub fn open_with_buckets(bucket_count: usize, records: BorrowRecordFile) -> Self {
        let mut ledger = Self::with_buckets(bucket_count, None);
        match records.read_all() {
            Ok(rows) => {
                let count = rows.len();
                rows.into_iter().for_each(|record| ledger.replay(record));
                tracing::info!(
                    "Replayed {} borrow records from {}",
                    count,
                    records.path().display()
                );
            }
            Err(e) => tracing::error!(
                "Failed to read borrow records from {}: {}",
                records.path().display(),
                e
            ),
        }
        ledger.records = Some(records);
        ledger
    }

    /// Record a borrow.
    ///
    /// Fails (false) when a field would not survive the record file, when `titles` is given
    /// and does not know `title`, or when the title is already held. Otherwise both indexes,
    /// the history and the record file are updated.
    pub fn borrow_book(
        &mut self,
        titles: Option<&dyn TitleLookup>,
        user: &str,
        title: &str,
        date: &str,
    ) -> bool {
        let record = HistoryRecord::new(user, title, date, LoanAction::Borrow);
        if !record.fits_record_row() {
            tracing::warn!(
                "Cannot borrow '{}' for '{}': commas and line breaks are not allowed",
                title,
                user
            );
            return false;
        }
        if let Some(titles) = titles {
            if !titles.has_title(title) {
                tracing::warn!("Cannot borrow '{}': not in the catalog", title);
                return false;
            }
        }
        if !self.check_available(user, title) {
            return false;
        }

        self.insert_loan(user, title, date);
        self.record(record);
        tracing::info!("Borrow recorded: '{}' borrowed '{}' on {}", user, title, date);
        true
    }

    /// Record a return.
    ///
    /// The active borrow for (`user`, `title`) is removed whatever `date` says. The return is
    /// written to history and to the record file even when there was nothing to return, in
    /// which case this returns false. A return whose fields would not survive the record
    /// file is refused outright and leaves no trace.
    pub fn return_book(&mut self, user: &str, title: &str, date: &str) -> bool {
        let record = HistoryRecord::new(user, title, date, LoanAction::Return);
        if !record.fits_record_row() {
            tracing::warn!(
                "Cannot return '{}' for '{}': commas and line breaks are not allowed",
                title,
                user
            );
            return false;
        }

        let removed = self.remove_loan(user, title);
        self.record(record);

        if removed {
            tracing::info!("Return processed: '{}' returned '{}' on {}", user, title, date);
        } else {
            tracing::warn!(
                "Return recorded, but '{}' had no active borrow of '{}'",
                user,
                title
            );
        }
        removed
    }

    /// [`Ledger::borrow_book`] dated with today's local date
    pub fn borrow_book_today(
        &mut self,
        titles: Option<&dyn TitleLookup>,
        user: &str,
        title: &str,
    ) -> bool {
        self.borrow_book(titles, user, title, &today())
    }

    /// [`Ledger::return_book`] dated with today's local date
    pub fn return_book_today(&mut self, user: &str, title: &str) -> bool {
        self.return_book(user, title, &today())
    }

    /// Titles `user` currently holds. `None` if the user never borrowed anything; an empty
    /// slice once everything has been returned.
    pub fn user_active_borrows(&self, user: &str) -> Option<&[LoanEntry]> {
        self.by_user.search(user).map(Vec::as_slice)
    }

    /// Users currently holding `title`, with the same `None`/empty distinction
    pub fn book_active_borrowers(&self, title: &str) -> Option<&[LoanEntry]> {
        self.by_title.search(title).map(Vec::as_slice)
    }

    pub fn current_borrower(&self, title: &str) -> Option<&str> {
        self.book_active_borrowers(title)
            .and_then(<[LoanEntry]>::first)
            .map(|entry| entry.counterpart.as_str())
    }

    /// Every borrow and return, oldest first
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Append to the in-memory history only; the record file is not touched
    pub fn add_history_entry(&mut self, record: HistoryRecord) {
        self.history.push(record);
    }

    /// Replay a record file on top of the current state, line by line, as if each row had
    /// been a live call. Nothing is written back. Returns the number of rows replayed.
    pub fn load_borrow_records_from_csv(&mut self, path: impl AsRef<Path>) -> AppResult<usize> {
        let rows = BorrowRecordFile::new(path.as_ref()).read_all()?;
        let count = rows.len();
        for record in rows {
            self.replay(record);
        }
        Ok(count)
    }

    fn replay(&mut self, record: HistoryRecord) {
        match record.action {
            LoanAction::Borrow => {
                if self.check_available(&record.user, &record.title) {
                    self.insert_loan(&record.user, &record.title, &record.date);
                }
            }
            LoanAction::Return => {
                if !self.remove_loan(&record.user, &record.title) {
                    tracing::debug!(
                        "Replayed return of '{}' by '{}' had no matching borrow",
                        record.title,
                        record.user
                    );
                }
            }
        }
        self.history.push(record);
    }

    fn check_available(&self, user: &str, title: &str) -> bool {
        if let Some(holder) = self.current_borrower(title) {
            tracing::warn!("Cannot borrow '{}': already borrowed by '{}'", title, holder);
            return false;
        }
        let already_held = self
            .user_active_borrows(user)
            .is_some_and(|loans| loans.iter().any(|loan| loan.counterpart == title));
        if already_held {
            tracing::warn!("Cannot borrow '{}': '{}' already has it", title, user);
            return false;
        }
        true
    }

    fn insert_loan(&mut self, user: &str, title: &str, date: &str) {
        push_entry(&mut self.by_user, user, LoanEntry::new(title, date));
        push_entry(&mut self.by_title, title, LoanEntry::new(user, date));
    }

    fn remove_loan(&mut self, user: &str, title: &str) -> bool {
        let from_user = remove_entry(&mut self.by_user, user, title);
        let from_title = remove_entry(&mut self.by_title, title, user);
        from_user || from_title
    }

    fn record(&mut self, record: HistoryRecord) {
        if let Some(file) = &self.records {
            if let Err(e) = file.append(&record) {
                tracing::error!(
                    "Could not append to {}: {}; ledger is ahead of the file",
                    file.path().display(),
                    e
                );
            }
        }
        self.history.push(record);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Append to the list under `key`, creating the list on first use
fn push_entry(index: &mut LoanIndex, key: &str, entry: LoanEntry) {
    match index.search_mut(key) {
        Some(list) => list.push(entry),
        None => index.insert(key.to_string(), vec![entry]),
    }
}

/// Remove the oldest entry under `key` whose counterpart matches. The (possibly empty)
/// list stays in the index.
fn remove_entry(index: &mut LoanIndex, key: &str, counterpart: &str) -> bool {
    let Some(list) = index.search_mut(key) else {
        return false;
    };
    match list.iter().position(|entry| entry.counterpart == counterpart) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}
