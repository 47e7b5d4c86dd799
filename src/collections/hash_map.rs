//! Fixed-capacity chained hash table.
//!
//! The table is a bucket array of singly linked chains. It never grows: once the number of
//! entries goes well past the bucket count, chains degrade into linear lists and lookups
//! become O(chain length). This is fine for catalogs in the thousands of entries; callers
//! with larger datasets pick a bigger bucket count up front with [`ChainedHashMap::with_buckets`].
//!
//! `insert` does not look for an existing key. A second insert under the same key shadows
//! the first one (the new node is prepended, and lookups walk from the head), and removing
//! the newer entry makes the older one visible again. Callers that need unique keys check
//! with [`ChainedHashMap::contains_key`] first.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

/// Default bucket count
pub const TABLE_SIZE: usize = 1000;

/// Hasher state used when none is supplied. `DefaultHasher::new()` uses fixed keys, so
/// bucket placement is the same on every call and every run.
pub type FixedState = BuildHasherDefault<DefaultHasher>;

struct Node<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

fn key_matches<K, Q>(stored: &K, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    <K as Borrow<Q>>::borrow(stored) == key
}

/// Chained hash table with a fixed number of buckets
pub struct ChainedHashMap<K, V, S = FixedState> {
    buckets: Vec<Link<K, V>>,
    len: usize,
    hasher: S,
}

impl<K, V> ChainedHashMap<K, V> {
    /// Create a table with [`TABLE_SIZE`] buckets
    pub fn new() -> Self {
        Self::with_buckets(TABLE_SIZE)
    }

    /// Create a table with `bucket_count` buckets (at least one)
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self::with_buckets_and_hasher(bucket_count, FixedState::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_buckets_and_hasher(TABLE_SIZE, hasher)
    }

    pub fn with_buckets_and_hasher(bucket_count: usize, hasher: S) -> Self {
        let buckets = std::iter::repeat_with(|| None)
            .take(bucket_count.max(1))
            .collect();
        Self {
            buckets,
            len: 0,
            hasher,
        }
    }

    /// Number of stored entries, shadowed duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets
            .iter()
            .map(|bucket| {
                let mut length = 0;
                let mut current = bucket.as_deref();
                while let Some(node) = current {
                    length += 1;
                    current = node.next.as_deref();
                }
                length
            })
            .max()
            .unwrap_or(0)
    }

    /// Iterate over every entry, bucket by bucket and head-first within a chain
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// Flatten all chains into `(key, value)` pairs. Order is unspecified.
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Prepend a new entry to the key's chain. Always succeeds.
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.bucket_index(&key);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Node { key, value, next }));
        self.len += 1;
    }

    /// Find the first entry for `key`, walking from the chain head
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut current = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(node) = current {
            if key_matches(&node.key, key) {
                return Some(&node.value);
            }
            current = node.next.as_deref();
        }
        None
    }

    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let mut current = self.buckets[index].as_deref_mut();
        while let Some(node) = current {
            if key_matches(&node.key, key) {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Overwrite the value of the first entry for `key`. Returns false if the key is absent.
    pub fn update<Q>(&mut self, key: &Q, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.search_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Unlink the first entry for `key` from its chain
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let mut link = &mut self.buckets[index];
        loop {
            match link {
                None => return false,
                Some(node) if key_matches(&node.key, key) => {
                    *link = node.next.take();
                    self.len -= 1;
                    return true;
                }
                Some(node) => link = &mut node.next,
            }
        }
    }
}

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Drop for ChainedHashMap<K, V, S> {
    fn drop(&mut self) {
        // Unlink node by node; the default recursive drop could overflow on a long chain.
        for bucket in &mut self.buckets {
            let mut current = bucket.take();
            while let Some(mut node) = current {
                current = node.next.take();
            }
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the entries of a [`ChainedHashMap`]
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Link<K, V>>,
    current: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current {
                self.current = node.next.as_deref();
                return Some((&node.key, &node.value));
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
