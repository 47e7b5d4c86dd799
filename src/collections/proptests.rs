use super::hash_map::tests::Colliding;
use super::*;

use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u16),
    Update(u8, u16),
    Remove(u8),
    Search(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Update(k, v)),
        any::<u8>().prop_map(Op::Remove),
        any::<u8>().prop_map(Op::Search),
    ]
}

/// Reference model: a stack of values per key, newest last, mirroring chain shadowing.
fn check_against_model<S: std::hash::BuildHasher>(
    map: &mut ChainedHashMap<u8, u16, S>,
    ops: &[Op],
) {
    let mut model: HashMap<u8, Vec<u16>> = HashMap::new();

    for op in ops {
        match *op {
            Op::Insert(k, v) => {
                map.insert(k, v);
                model.entry(k).or_default().push(v);
            }
            Op::Update(k, v) => {
                let expected = match model.get_mut(&k).and_then(|stack| stack.last_mut()) {
                    Some(top) => {
                        *top = v;
                        true
                    }
                    None => false,
                };
                assert_eq!(map.update(&k, v), expected);
            }
            Op::Remove(k) => {
                let expected = model.get_mut(&k).and_then(Vec::pop).is_some();
                assert_eq!(map.remove(&k), expected);
            }
            Op::Search(k) => {
                let expected = model.get(&k).and_then(|stack| stack.last());
                assert_eq!(map.search(&k), expected);
            }
        }
    }

    let total: usize = model.values().map(Vec::len).sum();
    assert_eq!(map.len(), total);
    assert_eq!(map.entries().len(), total);
}

proptest! {
    #[test]
    fn hash_map_matches_model(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut map = ChainedHashMap::with_buckets(17);
        check_against_model(&mut map, &ops);
    }

    #[test]
    fn hash_map_matches_model_when_everything_collides(
        ops in prop::collection::vec(op_strategy(), 0..300)
    ) {
        let mut map = ChainedHashMap::with_buckets_and_hasher(8, Colliding::default());
        check_against_model(&mut map, &ops);
    }

    #[test]
    fn merge_sort_orders_and_is_stable(input in prop::collection::vec((0u8..16, any::<u32>()), 0..200)) {
        // Tag each element with its input position so stability is observable
        let mut tagged: Vec<(u8, u32, usize)> = input
            .iter()
            .enumerate()
            .map(|(pos, (key, payload))| (*key, *payload, pos))
            .collect();
        merge_sort_by_key(&mut tagged, |(key, _, _)| *key);

        for pair in tagged.windows(2) {
            prop_assert!(pair[0].0 <= pair[1].0);
            if pair[0].0 == pair[1].0 {
                prop_assert!(pair[0].2 < pair[1].2);
            }
        }

        let mut sorted_input = input.clone();
        sorted_input.sort();
        let mut sorted_output: Vec<(u8, u32)> = tagged.iter().map(|(k, p, _)| (*k, *p)).collect();
        sorted_output.sort();
        prop_assert_eq!(sorted_input, sorted_output);
    }

    #[test]
    fn merge_sort_agrees_with_std(mut input in prop::collection::vec(any::<i64>(), 0..300)) {
        let mut expected = input.clone();
        expected.sort();
        merge_sort(&mut input);
        prop_assert_eq!(input, expected);
    }

    #[test]
    fn trie_auto_complete_is_folded_subset(
        words in prop::collection::vec("[a-zA-Z ]{0,8}", 0..40),
        prefix in "[a-zA-Z]{0,3}",
    ) {
        let mut trie = Trie::new();
        for word in &words {
            trie.insert(word);
        }

        let folded_prefix = prefix.to_ascii_lowercase();
        let expected: BTreeSet<String> = words
            .iter()
            .map(|w| w.to_ascii_lowercase())
            .filter(|w| w.starts_with(&folded_prefix))
            .map(|w| format!("{}{}", prefix, &w[folded_prefix.len()..]))
            .collect();

        let first = trie.get_auto_complete(&prefix);
        let second = trie.get_auto_complete(&prefix);
        prop_assert_eq!(&first, &second);

        let actual: BTreeSet<String> = first.iter().cloned().collect();
        prop_assert_eq!(actual.len(), first.len());
        prop_assert_eq!(actual, expected);
    }
}
