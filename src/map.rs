//! An ordered map based on a red-black tree.

use compare::{Compare, Natural};
use log::debug;
use std::cmp::Ordering;
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use std::ops;
use super::cursor::Cursor;
use super::error::{Error, Result};
use super::node::{self, Left, Right, Tree};

#[cfg(any(test, feature = "invariants"))]
use super::balance::Violation;

/// An ordered map based on a red-black tree.
///
/// Search, insertion and removal take O(log n) time in the worst case. Entries are kept in
/// ascending key order according to the map's comparator, and several entries may share a key
/// when they are added with [`insert`](#method.insert).
///
/// Positions inside the map are represented by [`Cursor`](../struct.Cursor.html)s. A cursor stays
/// valid across insertions and removals of other entries; only cursors to removed entries are
/// invalidated.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Map<K, V, C = Natural<K>> where C: Compare<K> {
    tree: Tree<K, V>,
    cmp: C,
}

impl<K, V> Map<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Map::with_cmp(compare::natural()) }
}

impl<K, V, C> Map<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map = rbtree::Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Map { tree: Tree::new(), cmp }
    }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.tree.is_empty() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let map: rbtree::Map<i32, &str> = rbtree::Map::new();
    /// assert!(map.cmp().compares_lt(&1, &2));
    ///
    /// let map: rbtree::Map<i32, &str, _> = rbtree::Map::with_cmp(natural().rev());
    /// assert!(map.cmp().compares_gt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the map.
    ///
    /// This has the same effect as `erase_range(begin(), end())` but releases the nodes in one
    /// pass instead of rebalancing after each removal.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.iter().next(), Some((&1, &"a")));
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.iter().next(), None);
    /// assert_eq!(map.begin(), map.end());
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing {} entries", self.len());
        self.tree.clear();
    }

    /// Inserts a new entry into the map and returns a cursor to it.
    ///
    /// The entry is added even if the map already contains the key; entries with equal keys are
    /// iterated in the order they were inserted. Use
    /// [`insert_or_assign`](#method.insert_or_assign) to keep keys unique.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// let cursor = map.insert(1, "a");
    /// assert_eq!(map.get_at(cursor), Ok((&1, &"a")));
    ///
    /// map.insert(1, "b");
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &"a"), (&1, &"b")]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Cursor {
        let id = self.tree.insert(&self.cmp, key, value);
        self.tree.cursor(Some(id))
    }

    /// Replaces the value of the entry with the given key, returning the old value, or inserts a
    /// new entry if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.insert_or_assign(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert_or_assign(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.find(&self.cmp, &key) {
            Some(id) => Some(std::mem::replace(self.tree.key_value_mut(id).1, value)),
            None => {
                self.tree.insert(&self.cmp, key, value);
                None
            }
        }
    }

    /// Returns a mutable reference to the value associated with the given key, inserting the
    /// default value first if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut counts: rbtree::Map<&str, i32> = rbtree::Map::new();
    ///
    /// for s in vec!["a", "b", "a", "c", "a", "b"] {
    ///     *counts.at(s) += 1;
    /// }
    ///
    /// assert_eq!(counts[&"a"], 3);
    /// assert_eq!(counts[&"b"], 2);
    /// assert_eq!(counts[&"c"], 1);
    /// ```
    pub fn at(&mut self, key: K) -> &mut V where V: Default {
        let id = match self.tree.find(&self.cmp, &key) {
            Some(id) => id,
            None => self.tree.insert(&self.cmp, key, V::default()),
        };

        self.tree.key_value_mut(id).1
    }

    /// Returns a cursor to an entry with the given key, or the end cursor if the map does not
    /// contain the key.
    ///
    /// If several entries share the key, the one found first while descending the tree is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.search(&1), map.end());
    ///
    /// map.insert(1, "a");
    /// let cursor = map.search(&1);
    /// assert_eq!(map.get_at(cursor), Ok((&1, &"a")));
    /// ```
    pub fn search<Q: ?Sized>(&self, key: &Q) -> Cursor where C: Compare<Q, K> {
        self.tree.cursor(self.tree.find(&self.cmp, key))
    }

    /// Removes an entry with the given key and returns it, or returns `None` if the map does not
    /// contain the key.
    ///
    /// If several entries share the key, the one found first while descending the tree is
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.erase(&1), Some((1, "a")));
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&1), None);
    /// assert_eq!(map.erase(&1), None);
    /// ```
    pub fn erase<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        self.tree.find(&self.cmp, key).map(|id| {
            let (key, value, _) = self.tree.remove(id);
            (key, value)
        })
    }

    /// Removes the entry at the given cursor and returns a cursor to the entry that followed it.
    ///
    /// Erasing at the end cursor does nothing and returns the end cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCursor`](../enum.Error.html#variant.InvalidCursor) if the cursor's
    /// entry is no longer in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let next = map.erase_at(map.search(&2)).unwrap();
    /// assert_eq!(map.get_at(next), Ok((&3, &"c")));
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &"a"), (&3, &"c")]);
    ///
    /// assert_eq!(map.erase_at(map.end()), Ok(map.end()));
    /// ```
    pub fn erase_at(&mut self, cursor: Cursor) -> Result<Cursor> {
        match self.tree.resolve(cursor)? {
            None => Ok(cursor),
            Some(id) => {
                let (_, _, next) = self.tree.remove(id);
                Ok(self.tree.cursor(next))
            }
        }
    }

    /// Removes the entries in `[start, end)` and returns how many were removed.
    ///
    /// `end` may be the end cursor, in which case every entry from `start` onwards is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCursor`](../enum.Error.html#variant.InvalidCursor) if either cursor
    /// refers to an entry that is no longer in the map, and
    /// [`Error::OutOfRange`](../enum.Error.html#variant.OutOfRange) if `end` cannot be reached by
    /// advancing from `start`. The map is left untouched in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: rbtree::Map<_, _> = (1..6).map(|k| (k, k * 10)).collect();
    ///
    /// let start = map.search(&2);
    /// let end = map.search(&4);
    /// assert_eq!(map.erase_range(start, end), Ok(2));
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &10), (&4, &40), (&5, &50)]);
    ///
    /// let start = map.search(&4);
    /// assert_eq!(map.erase_range(start, map.end()), Ok(2));
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &10)]);
    /// ```
    pub fn erase_range(&mut self, start: Cursor, end: Cursor) -> Result<usize> {
        let first = self.tree.resolve(start)?;
        let stop = self.tree.resolve(end)?;

        let mut count = 0;
        let mut link = first;
        while link != stop {
            let id = link.ok_or(Error::OutOfRange)?;
            link = self.tree.step::<Right>(id);
            count += 1;
        }

        debug!("erasing a range of {} entries", count);

        let mut link = first;
        for _ in 0..count {
            let id = match link {
                Some(id) => id,
                None => break,
            };
            let (_, _, next) = self.tree.remove(id);
            link = next;
        }

        Ok(count)
    }

    /// Returns a cursor to the entry with the minimum key, or the end cursor if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.begin(), map.end());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.get_at(map.begin()), Ok((&1, &"a")));
    /// ```
    pub fn begin(&self) -> Cursor { self.tree.cursor(self.tree.first()) }

    /// Returns the end cursor, the position just past the maximum key.
    pub fn end(&self) -> Cursor { Cursor::end() }

    /// Returns a cursor to the entry following the given cursor's entry in key order.
    ///
    /// Advancing past the maximum key yields the end cursor, and advancing the end cursor leaves
    /// it at the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCursor`](../enum.Error.html#variant.InvalidCursor) if the cursor's
    /// entry is no longer in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let cursor = map.advance(map.begin()).unwrap();
    /// assert_eq!(map.get_at(cursor), Ok((&2, &"b")));
    ///
    /// let cursor = map.advance(cursor).unwrap();
    /// assert_eq!(cursor, map.end());
    /// assert_eq!(map.advance(cursor), Ok(map.end()));
    /// ```
    pub fn advance(&self, cursor: Cursor) -> Result<Cursor> {
        Ok(match self.tree.resolve(cursor)? {
            None => cursor,
            Some(id) => self.tree.cursor(self.tree.step::<Right>(id)),
        })
    }

    /// Returns the cursor `n` entries after the given cursor in key order.
    ///
    /// Moving past the maximum key yields the end cursor, and the end cursor stays at the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCursor`](../enum.Error.html#variant.InvalidCursor) if the cursor's
    /// entry is no longer in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: rbtree::Map<_, _> = (1..6).map(|k| (k, k * 10)).collect();
    ///
    /// let cursor = map.advance_by(map.begin(), 3).unwrap();
    /// assert_eq!(map.get_at(cursor), Ok((&4, &40)));
    ///
    /// assert_eq!(map.advance_by(cursor, 10), Ok(map.end()));
    /// assert_eq!(map.advance_by(map.begin(), 0), Ok(map.begin()));
    /// ```
    pub fn advance_by(&self, cursor: Cursor, n: usize) -> Result<Cursor> {
        let mut link = match self.tree.resolve(cursor)? {
            None => return Ok(cursor),
            link => link,
        };

        for _ in 0..n {
            link = match link {
                Some(id) => self.tree.step::<Right>(id),
                None => break,
            };
        }

        Ok(self.tree.cursor(link))
    }

    /// Returns a cursor to the entry preceding the given cursor's entry in key order.
    ///
    /// Retreating from the end cursor yields the entry with the maximum key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](../enum.Error.html#variant.OutOfRange) when retreating from
    /// the entry with the minimum key, or from the end cursor of an empty map, and
    /// [`Error::InvalidCursor`](../enum.Error.html#variant.InvalidCursor) if the cursor's entry
    /// is no longer in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::Error;
    ///
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.retreat(map.end()), Err(Error::OutOfRange));
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let cursor = map.retreat(map.end()).unwrap();
    /// assert_eq!(map.get_at(cursor), Ok((&2, &"b")));
    ///
    /// let cursor = map.retreat(cursor).unwrap();
    /// assert_eq!(cursor, map.begin());
    /// assert_eq!(map.retreat(cursor), Err(Error::OutOfRange));
    /// ```
    pub fn retreat(&self, cursor: Cursor) -> Result<Cursor> {
        let prev = match self.tree.resolve(cursor)? {
            None => self.tree.last(),
            Some(id) => self.tree.step::<Left>(id),
        };

        prev.map(|id| self.tree.cursor(Some(id))).ok_or(Error::OutOfRange)
    }

    /// Returns references to the key and value at the given cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](../enum.Error.html#variant.OutOfRange) for the end cursor
    /// and [`Error::InvalidCursor`](../enum.Error.html#variant.InvalidCursor) if the cursor's
    /// entry is no longer in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::Error;
    ///
    /// let mut map = rbtree::Map::new();
    /// let cursor = map.insert(1, "a");
    ///
    /// assert_eq!(map.get_at(cursor), Ok((&1, &"a")));
    /// assert_eq!(map.get_at(map.end()), Err(Error::OutOfRange));
    ///
    /// map.erase(&1);
    /// assert_eq!(map.get_at(cursor), Err(Error::InvalidCursor));
    /// ```
    pub fn get_at(&self, cursor: Cursor) -> Result<(&K, &V)> {
        let id = self.tree.resolve(cursor)?.ok_or(Error::OutOfRange)?;
        Ok(self.tree.key_value(id))
    }

    /// Returns a reference to the key and a mutable reference to the value at the given cursor.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`get_at`](#method.get_at) does.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// let cursor = map.insert(1, "a");
    ///
    /// *map.get_at_mut(cursor).unwrap().1 = "b";
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_at_mut(&mut self, cursor: Cursor) -> Result<(&K, &mut V)> {
        let id = self.tree.resolve(cursor)?.ok_or(Error::OutOfRange)?;
        Ok(self.tree.key_value_mut(id))
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.tree.find(&self.cmp, key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.tree.find(&self.cmp, key).map(|id| self.tree.key_value(id).1)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    ///
    /// {
    ///     let value = map.get_mut(&1).unwrap();
    ///     assert_eq!(*value, "a");
    ///     *value = "b";
    /// }
    ///
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        match self.tree.find(&self.cmp, key) {
            Some(id) => Some(self.tree.key_value_mut(id).1),
            None => None,
        }
    }

    /// Returns references to the map's minimum key and its associated value, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.first(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.first(), Some((&1, &"a")));
    /// ```
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|id| self.tree.key_value(id))
    }

    /// Returns references to the map's maximum key and its associated value, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.last(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.last(), Some((&3, &"c")));
    /// ```
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|id| self.tree.key_value(id))
    }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator,
    /// and in descending order when reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next_back(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<K, V> { Iter(node::Iter::new(&self.tree)) }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// let mut i = 1;
    ///
    /// for (_, value) in map.iter_mut() {
    ///     assert_eq!(i, *value);
    ///     *value *= 2;
    ///     i += 1;
    /// }
    ///
    /// assert_eq!(map[&"a"], 2);
    /// assert_eq!(map[&"b"], 4);
    /// assert_eq!(map[&"c"], 6);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> { IterMut(node::IterMut::new(&mut self.tree)) }

    /// Checks the red-black invariants of the underlying tree.
    ///
    /// Only available in test builds and with the `invariants` feature.
    #[cfg(any(test, feature = "invariants"))]
    pub fn validate(&self) -> std::result::Result<usize, Violation> {
        self.tree.validate(&self.cmp)
    }

    #[cfg(test)]
    pub(crate) fn tree(&self) -> &Tree<K, V> { &self.tree }
}

impl<K, V, C> Debug for Map<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Default for Map<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Map::with_cmp(Default::default()) }
}

/// Extends the map with the given entries, replacing the value of any key it already contains.
impl<K, V, C> Extend<(K, V)> for Map<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert_or_assign(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for Map<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for Map<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Map<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;

    /// Returns a reference to the value associated with the given key.
    ///
    /// # Panics
    ///
    /// Panics if the map does not contain the key.
    fn index(&self, key: &'a Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

/// Consumes the map, yielding its entries in ascending order.
///
/// # Examples
///
/// ```
/// let mut map = rbtree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// let mut it = map.into_iter();
/// assert_eq!(it.next(), Some((1, "a")));
/// assert_eq!(it.next(), Some((2, "b")));
/// assert_eq!(it.next(), Some((3, "c")));
/// assert_eq!(it.next(), None);
/// ```
impl<K, V, C> IntoIterator for Map<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { IntoIter(self.tree.into_ordered()) }
}

impl<K, V, C> PartialEq for Map<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(l, r)| {
            self.cmp.compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C> Eq for Map<K, V, C> where V: Eq, C: Compare<K> {}

impl<K, V, C> PartialOrd for Map<K, V, C> where V: PartialOrd, C: Compare<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Some(Equal),
                (None, Some(_)) => return Some(Less),
                (Some(_), None) => return Some(Greater),
                (Some(l), Some(r)) => match self.cmp.compare(l.0, r.0) {
                    Equal => match l.1.partial_cmp(r.1) {
                        Some(Equal) => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return Some(non_eq),
                },
            }
        }
    }
}

impl<K, V, C> Ord for Map<K, V, C> where V: Ord, C: Compare<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Equal,
                (None, Some(_)) => return Less,
                (Some(_), None) => return Greater,
                (Some(l), Some(r)) => match self.cmp.compare(l.0, r.0) {
                    Equal => match l.1.cmp(r.1) {
                        Equal => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return non_eq,
                },
            }
        }
    }
}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through the `IntoIterator` trait:
///
/// ```
/// let mut map = rbtree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
#[derive(Clone)]
pub struct IntoIter<K, V>(node::IntoIter<K, V>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::iter`](struct.Map.html#method.iter) or the `IntoIterator` trait:
///
/// ```
/// let mut map = rbtree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a>(node::Iter<'a, K, V>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::iter_mut`](struct.Map.html#method.iter_mut) or the
/// `IntoIterator` trait:
///
/// ```
/// let mut map = rbtree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &mut map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct IterMut<'a, K: 'a, V: 'a>(node::IterMut<'a, K, V>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}
