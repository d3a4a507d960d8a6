use crate::error::TrieError;
use crate::set::TrieSet;
use crate::trie::{TrieMap, TrieString, TrieVec};

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
enum Op<V> {
    Insert(Vec<u8>, V),
    Remove(Vec<u8>),
    Get(Vec<u8>),
    Clear,
}

// A small alphabet keeps prefixes shared, which is where pruning matters.
fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    prop::collection::vec(0u8..4, 0..=12)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op<u64>>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        19 => key.clone().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

// Two short segments, joined and optionally terminated by runs of
// separators, so equal paths come in several spellings.
fn path_strategy() -> impl Strategy<Value = (PathBuf, PathBuf)> {
    ("[ab]{1,2}", "[ab]{1,2}", 1usize..3, 0usize..3).prop_map(|(head, tail, inner, trailing)| {
        let spelled = format!("{head}{}{tail}{}", "/".repeat(inner), "/".repeat(trailing));
        (PathBuf::from(spelled), PathBuf::from(format!("{head}/{tail}")))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btree_map(ops in ops_strategy()) {
        let mut t: TrieVec<u8, u64> = TrieVec::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(key.clone(), value).unwrap();
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key).unwrap();
                    let old_m = m.remove(&key);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Get(key) => {
                    let got_t = t.get(&key).unwrap().copied();
                    let got_m = m.get(&key).copied();
                    prop_assert_eq!(got_t, got_m);
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        prop_assert!(t.check().is_ok());
        let got: Vec<(Vec<u8>, u64)> = t.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_strings_iterate_in_sorted_order(words in prop::collection::vec("[a-c]{0,6}", 0..64)) {
        let t = TrieString::try_from_iter(words.iter().map(|w| (w.clone(), w.len()))).unwrap();
        let expected: Vec<&String> = words.iter().collect::<BTreeSet<_>>().into_iter().collect();
        let got: Vec<&String> = t.keys().iter().collect();
        prop_assert_eq!(got, expected);
        prop_assert!(t.check().is_ok());
    }

    #[test]
    fn prop_remove_is_idempotent(keys in prop::collection::vec(key_strategy(), 1..64), index in any::<prop::sample::Index>()) {
        let mut t: TrieSet<Vec<u8>, u8> = TrieSet::try_from_iter(keys.clone()).unwrap();
        let victim = index.get(&keys);
        let len = t.len();
        prop_assert_eq!(t.remove(victim), Ok(true));
        prop_assert_eq!(t.len(), len - 1);
        prop_assert_eq!(t.remove(victim), Ok(false));
        prop_assert_eq!(t.len(), len - 1);
        prop_assert_eq!(t.contains(victim), Ok(false));
    }

    #[test]
    fn prop_cursor_removal_matches_retain(pairs in prop::collection::vec((key_strategy(), any::<u8>()), 0..128)) {
        let mut t: TrieVec<u8, u8> = TrieVec::try_from_iter(pairs.clone()).unwrap();
        let mut m: BTreeMap<Vec<u8>, u8> = pairs.into_iter().collect();
        let distinct = m.len();

        let mut cursor = t.entries().cursor();
        let mut visited = 0;
        while let Some((_, value)) = cursor.next(&t).unwrap() {
            visited += 1;
            if value % 2 == 1 {
                cursor.remove(&mut t).unwrap();
            }
        }
        m.retain(|_, value| *value % 2 == 0);

        prop_assert_eq!(visited, distinct);
        prop_assert_eq!(t.len(), m.len());
        prop_assert!(t.check().is_ok());
        let got: Vec<(Vec<u8>, u8)> = t.into_iter().collect();
        let expected: Vec<(Vec<u8>, u8)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_optional_keys_match_btree_map(ops in prop::collection::vec((prop::option::of("[ab]{0,3}"), any::<u8>(), any::<bool>()), 0..200)) {
        let mut t: TrieMap<Option<String>, char, u8> = TrieMap::new();
        let mut m: BTreeMap<Option<String>, u8> = BTreeMap::new();

        for (key, value, insert) in ops {
            if insert {
                prop_assert_eq!(t.insert(key.clone(), value).unwrap(), m.insert(key.clone(), value));
            } else {
                prop_assert_eq!(t.remove(&key).unwrap(), m.remove(&key));
            }
            prop_assert_eq!(t.get(&key).unwrap(), m.get(&key));
            prop_assert_eq!(t.len(), m.len());
        }

        prop_assert!(t.check().is_ok());
        let got: Vec<(&Option<String>, &u8)> = t.iter().collect();
        let expected: Vec<(&Option<String>, &u8)> = m.iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_nested_null_keys_are_rejected(inner in prop::option::of("[ab]{0,3}")) {
        let mut t: TrieMap<Option<Option<String>>, char, u8> = TrieMap::new();
        match inner {
            Some(s) => {
                prop_assert_eq!(t.insert(Some(Some(s)), 1), Ok(None));
            }
            None => {
                prop_assert!(matches!(t.insert(Some(None), 1), Err(TrieError::UnsupportedKey(_))));
                prop_assert_eq!(t.insert(None, 1), Ok(None));
            }
        }
        prop_assert_eq!(t.len(), 1);
        prop_assert!(t.check().is_ok());
    }

    #[test]
    fn prop_equal_paths_share_a_slot(paths in prop::collection::vec((path_strategy(), any::<u8>()), 0..64)) {
        let mut t: TrieMap<PathBuf, char, u8> = TrieMap::new();
        let mut m: BTreeMap<PathBuf, u8> = BTreeMap::new();

        for ((spelled, plain), value) in paths {
            prop_assert_eq!(&spelled, &plain);
            prop_assert_eq!(t.insert(spelled.clone(), value).unwrap(), m.insert(spelled, value));
            prop_assert_eq!(t.get(plain.as_path()).unwrap(), m.get(Path::new(&plain)));
            prop_assert_eq!(t.len(), m.len());
        }

        prop_assert!(t.check().is_ok());
    }

    #[test]
    fn prop_integer_keys_match_btree_map(keys in prop::collection::vec(0u32..2048, 0..128), removals in prop::collection::vec(0u32..2048, 0..64)) {
        let mut t: TrieMap<u32, u8, u32> = TrieMap::new();
        let mut m: BTreeMap<u32, u32> = BTreeMap::new();

        for key in keys {
            prop_assert_eq!(t.insert(key, key).unwrap(), m.insert(key, key));
        }
        for key in removals {
            prop_assert_eq!(t.remove(&key).unwrap(), m.remove(&key));
            prop_assert_eq!(t.get(&key).unwrap(), None);
        }

        prop_assert_eq!(t.len(), m.len());
        prop_assert!(t.check().is_ok());
        let got: Vec<u32> = t.keys().iter().copied().collect();
        let expected: Vec<u32> = m.keys().copied().collect();
        prop_assert_eq!(got, expected);
    }
}
