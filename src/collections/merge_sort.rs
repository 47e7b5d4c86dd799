//! Top-down merge sort.
//!
//! Stable: when two elements compare equal, the one from the left half is written first.
//! Each merge copies both halves into scratch buffers, so elements must be `Clone`. Sorting
//! slices of references (`&mut [&Book]`) keeps those copies cheap.

use std::cmp::Ordering;

/// Sort by the element type's `Ord`
pub fn merge_sort<T: Ord + Clone>(items: &mut [T]) {
    merge_sort_by(items, T::cmp);
}

/// Sort with a comparator
pub fn merge_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    sort_range(items, &mut compare);
}

/// Sort by a key extracted from each element
pub fn merge_sort_by_key<T, K, F>(items: &mut [T], mut key: F)
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    merge_sort_by(items, |a, b| key(a).cmp(&key(b)));
}

fn sort_range<T, F>(items: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }

    let mid = items.len() / 2;
    {
        let (left, right) = items.split_at_mut(mid);
        sort_range(left, compare);
        sort_range(right, compare);
    }
    merge(items, mid, compare);
}

/// Merge the sorted runs `items[..mid]` and `items[mid..]`
fn merge<T, F>(items: &mut [T], mid: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut left = items[..mid].to_vec().into_iter().peekable();
    let mut right = items[mid..].to_vec().into_iter().peekable();

    for slot in items.iter_mut() {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, _) => false,
        };
        let next = if take_left { left.next() } else { right.next() };
        if let Some(value) = next {
            *slot = value;
        }
    }
}
