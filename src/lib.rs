//! Library Lookup
//!
//! The data layer of a small library catalog: a chained hash table holding the books, a
//! trie for title autocomplete, a stable merge sort for ordering result lists, and a
//! borrow/return ledger kept in sync with an append-only record file.
//!
//! Everything here is single-threaded and synchronous. Services are mutated through
//! `&mut self`; wrap them in a lock if they must be shared.

pub mod collections;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};
pub use crate::services::{Catalog, Ledger, Library, SearchIndex};
