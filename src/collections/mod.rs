//! Hand-rolled collections backing the catalog, autocomplete and ledger
//!
//! - [`ChainedHashMap`]: fixed-capacity hash table with linked chains
//! - [`Trie`]: ASCII prefix tree for autocomplete
//! - [`merge_sort`]: stable, comparator-driven top-down merge sort

pub mod hash_map;
pub mod merge_sort;
pub mod trie;

#[cfg(test)]
mod proptests;

pub use hash_map::{ChainedHashMap, TABLE_SIZE};
pub use merge_sort::{merge_sort, merge_sort_by, merge_sort_by_key};
pub use trie::Trie;
