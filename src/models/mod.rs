//! Data models for the library lookup core

pub mod book;
pub mod loan;

// Re-export commonly used types
pub use book::{Book, BookId, SortKey, DEFAULT_PUBLISHER};
pub use loan::{HistoryRecord, LoanAction, LoanEntry};
