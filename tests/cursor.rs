use rbtree::{Cursor, Error, Map};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn keys<V>(map: &Map<i32, V>) -> Vec<i32> {
    map.iter().map(|e| *e.0).collect()
}

fn walk_forward<V>(map: &Map<i32, V>) -> Vec<i32> {
    let mut keys = vec![];
    let mut cursor = map.begin();

    while cursor != map.end() {
        keys.push(*map.get_at(cursor).unwrap().0);
        cursor = map.advance(cursor).unwrap();
    }

    keys
}

fn walk_backward<V>(map: &Map<i32, V>) -> Vec<i32> {
    let mut keys = vec![];
    let mut cursor = map.end();

    while let Ok(prev) = map.retreat(cursor) {
        keys.push(*map.get_at(prev).unwrap().0);
        cursor = prev;
    }

    keys
}

#[test]
fn ascending_inserts_walk_in_order() {
    init();
    let mut map = Map::new();
    for key in 1..8 { map.insert(key, key * 2); }

    assert_eq!(walk_forward(&map), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(walk_backward(&map), [7, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn erase_middle_key() {
    init();
    let mut map = Map::new();
    for key in [10, 20, 30] { map.insert(key, ()); }

    assert_eq!(map.erase(&20), Some((20, ())));
    assert_eq!(keys(&map), [10, 30]);
    assert_eq!(map.len(), 2);
}

#[test]
fn at_creates_default_entry() {
    init();
    let mut map: Map<i32, String> = Map::new();

    assert_eq!(map.at(7), "");
    assert_eq!(map.len(), 1);

    map.at(7).push_str("seven");
    assert_eq!(map.len(), 1);
    assert_eq!(map[&7], "seven");
}

#[test]
fn erase_everything_one_by_one() {
    init();
    let mut map = Map::new();
    for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] { map.insert(key, ()); }

    for key in 1..10 {
        assert!(map.erase(&key).is_some());
        assert_eq!(walk_forward(&map), ((key + 1)..10).collect::<Vec<_>>());
    }

    assert_eq!(map.begin(), map.end());
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
}

#[test]
fn end_cursor_is_out_of_range() {
    init();
    let mut map = Map::new();
    map.insert(1, "a");

    assert_eq!(map.get_at(map.end()), Err(Error::OutOfRange));
    assert_eq!(map.get_at_mut(Cursor::default()).map(|e| *e.1), Err(Error::OutOfRange));
    assert_eq!(map.advance(map.end()), Ok(map.end()));
}

#[test]
fn retreat_before_first_is_out_of_range() {
    init();
    let mut map = Map::new();
    assert_eq!(map.retreat(map.end()), Err(Error::OutOfRange));

    map.insert(2, "b");
    map.insert(1, "a");

    let first = map.begin();
    assert_eq!(map.retreat(first), Err(Error::OutOfRange));
    assert_eq!(map.get_at(first), Ok((&1, &"a")));
}

#[test]
fn stale_cursor_is_invalid() {
    init();
    let mut map = Map::new();
    let cursor = map.insert(1, "a");
    map.insert(2, "b");

    map.erase(&1);
    assert_eq!(map.get_at(cursor), Err(Error::InvalidCursor));
    assert_eq!(map.advance(cursor), Err(Error::InvalidCursor));
    assert_eq!(map.retreat(cursor), Err(Error::InvalidCursor));
    assert_eq!(map.erase_at(cursor), Err(Error::InvalidCursor));

    // the freed slot is reused, but not the identity
    map.insert(3, "c");
    assert_eq!(map.get_at(cursor), Err(Error::InvalidCursor));
    assert_eq!(map.len(), 2);
}

#[test]
fn cursors_survive_unrelated_mutation() {
    init();
    let mut map = Map::new();
    let cursor = map.insert(50, ());

    for key in 0..100 {
        if key != 50 { map.insert(key, ()); }
    }
    for key in (0..100).filter(|k| k % 2 == 1) { map.erase(&key); }

    assert_eq!(map.get_at(cursor), Ok((&50, &())));
    assert_eq!(map.get_at(map.advance(cursor).unwrap()), Ok((&52, &())));
    assert_eq!(map.get_at(map.retreat(cursor).unwrap()), Ok((&48, &())));
    assert_eq!(map.get_at(map.advance_by(cursor, 3).unwrap()), Ok((&56, &())));
}

#[test]
fn erase_at_end_is_noop() {
    init();
    let mut map = Map::new();
    map.insert(1, ());

    assert_eq!(map.erase_at(map.end()), Ok(map.end()));
    assert_eq!(map.len(), 1);
}

#[test]
fn erase_range_to_end() {
    init();
    let mut map: Map<_, _> = (0..20).map(|k| (k, ())).collect();

    let start = map.search(&12);
    assert_eq!(map.erase_range(start, map.end()), Ok(8));
    assert_eq!(keys(&map), (0..12).collect::<Vec<_>>());
}

#[test]
fn erase_empty_range() {
    init();
    let mut map: Map<_, _> = (0..5).map(|k| (k, ())).collect();

    let at = map.search(&3);
    assert_eq!(map.erase_range(at, at), Ok(0));
    assert_eq!(map.len(), 5);
}

#[test]
fn erase_range_backwards_is_rejected() {
    init();
    let mut map: Map<_, _> = (0..10).map(|k| (k, ())).collect();

    let start = map.search(&7);
    let end = map.search(&2);
    assert_eq!(map.erase_range(start, end), Err(Error::OutOfRange));
    assert_eq!(map.len(), 10);
}

#[test]
fn duplicates_are_kept_in_insertion_order() {
    init();
    let mut map = Map::new();
    map.insert(1, "a");
    map.insert(2, "x");
    map.insert(1, "b");
    map.insert(1, "c");

    assert_eq!(map.len(), 4);
    assert_eq!(
        map.iter().collect::<Vec<_>>(),
        [(&1, &"a"), (&1, &"b"), (&1, &"c"), (&2, &"x")]
    );

    assert!(map.erase(&1).is_some());
    assert_eq!(map.iter().filter(|e| *e.0 == 1).count(), 2);
}

#[test]
fn reverse_comparator() {
    use compare::{natural, Compare};

    init();
    let mut map = Map::with_cmp(natural().rev());
    for key in [3, 1, 2] { map.insert(key, ()); }

    assert_eq!(map.iter().map(|e| *e.0).collect::<Vec<i32>>(), [3, 2, 1]);
    assert_eq!(map.get_at(map.begin()), Ok((&3, &())));
}

#[test]
fn debug_lists_entries_in_order() {
    init();
    let mut map = Map::new();
    map.insert(2, "b");
    map.insert(1, "a");

    assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b"}"#);
}
