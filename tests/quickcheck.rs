#![cfg(feature = "quickcheck")]

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rbtree::Map;

#[quickcheck]
fn iterates_in_sorted_order(keys: Vec<i16>) -> bool {
    let mut map = Map::new();
    for &key in &keys { map.insert(key, ()); }

    let mut sorted = keys;
    sorted.sort();

    map.len() == sorted.len() && map.iter().map(|e| *e.0).eq(sorted.into_iter())
}

#[quickcheck]
fn iterates_in_reverse_order(map: Map<u8, u8>) -> bool {
    let forward: Vec<_> = map.iter().collect();
    let backward: Vec<_> = map.iter().rev().collect();
    forward.into_iter().rev().eq(backward.into_iter())
}

#[quickcheck]
fn into_iter_matches_iter(map: Map<u8, u8>) -> bool {
    let borrowed: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
    map.into_iter().eq(borrowed.into_iter())
}

#[quickcheck]
fn search_finds_inserted(mut map: Map<u8, u8>, key: u8, value: u8) -> bool {
    let cursor = map.insert(key, value);
    map.get_at(cursor) == Ok((&key, &value)) && map.get_at(map.search(&key)).is_ok()
}

#[quickcheck]
fn insert_or_assign_keeps_one_entry(mut map: Map<u8, u8>, key: u8, first: u8, second: u8)
    -> bool {

    map.insert_or_assign(key, first);
    let len = map.len();

    map.insert_or_assign(key, second) == Some(first) &&
        map.len() == len &&
        map.get(&key) == Some(&second) &&
        map.iter().filter(|e| *e.0 == key).count() == 1
}

#[quickcheck]
fn insert_affects_no_others(mut map: Map<u8, u8>, key: u8, value: u8) -> bool {
    let old_map = map.clone();
    map.insert_or_assign(key, value);

    map.iter().filter(|e| *e.0 != key).collect::<Vec<_>>() ==
        old_map.iter().filter(|e| *e.0 != key).collect::<Vec<_>>()
}

#[quickcheck]
fn erase_missing_is_noop(mut map: Map<u8, u8>, key: u8) -> TestResult {
    if map.contains_key(&key) { return TestResult::discard(); }

    let old_map = map.clone();
    TestResult::from_bool(map.erase(&key).is_none() && map == old_map)
}

#[quickcheck]
fn erase_removes_only_key(mut map: Map<u8, u8>, key: u8) -> TestResult {
    let old_map = map.clone();

    match map.erase(&key) {
        None => TestResult::discard(),
        Some((erased, _)) => TestResult::from_bool(
            erased == key &&
            !map.contains_key(&key) &&
            map.len() == old_map.len() - 1 &&
            map.iter().collect::<Vec<_>>() ==
                old_map.iter().filter(|e| *e.0 != key).collect::<Vec<_>>()
        ),
    }
}

#[quickcheck]
fn erase_one_by_one_empties(mut map: Map<u8, u8>) -> bool {
    let keys: Vec<_> = map.iter().map(|e| *e.0).collect();

    for key in keys {
        if map.erase(&key).is_none() { return false; }
    }

    map.is_empty() && map.len() == 0 && map.begin() == map.end()
}

#[quickcheck]
fn erase_at_begin_drains_in_order(mut map: Map<u8, u8>) -> bool {
    let expected: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
    let mut drained = vec![];

    let mut cursor = map.begin();
    while !cursor.is_end() {
        let (&k, &v) = map.get_at(cursor).unwrap();
        drained.push((k, v));
        cursor = map.erase_at(cursor).unwrap();
    }

    drained == expected && map.is_empty()
}

#[quickcheck]
fn erase_range_whole_map(mut map: Map<u8, u8>) -> bool {
    let len = map.len();
    let (start, end) = (map.begin(), map.end());
    map.erase_range(start, end) == Ok(len) && map.is_empty()
}

#[quickcheck]
fn clone_is_deep(map: Map<u8, u8>, key: u8, value: u8) -> bool {
    let before: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();

    let mut copy = map.clone();
    copy.insert(key, value);
    *copy.at(key) = value.wrapping_add(1);

    copy.len() == map.len() + 1 &&
        map.iter().map(|(&k, &v)| (k, v)).eq(before.into_iter())
}

#[quickcheck]
fn clone_from_replaces_contents(mut target: Map<u8, u8>, source: Map<u8, u8>) -> bool {
    target.clone_from(&source);
    target == source && target.len() == source.len()
}

#[quickcheck]
fn advance_by_matches_nth(map: Map<u8, u8>, n: usize) -> bool {
    let n = n % (map.len() + 2);
    let cursor = map.advance_by(map.begin(), n).unwrap();

    match map.iter().nth(n) {
        Some(entry) => map.get_at(cursor) == Ok(entry),
        None => cursor == map.end(),
    }
}

#[quickcheck]
fn ordering_matches_entries(a: Map<u8, u8>, b: Map<u8, u8>) -> bool {
    let l: Vec<_> = a.iter().map(|(&k, &v)| (k, v)).collect();
    let r: Vec<_> = b.iter().map(|(&k, &v)| (k, v)).collect();

    Ord::cmp(&a, &b) == l.cmp(&r) && a.partial_cmp(&b) == l.partial_cmp(&r) && (a == b) == (l == r)
}

#[quickcheck]
fn equal_maps_hash_equal(map: Map<u8, u8>) -> bool {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash(map: &Map<u8, u8>) -> u64 {
        let mut h = DefaultHasher::new();
        map.hash(&mut h);
        h.finish()
    }

    // same entries, different insertion order and so a different shape
    let rebuilt: Map<u8, u8> = map.iter().rev().map(|(&k, &v)| (k, v)).collect();
    rebuilt == map && hash(&rebuilt) == hash(&map)
}
