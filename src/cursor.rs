//! Positions inside a map.

/// The slot and identity stamp of a single entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pub index: usize,
    pub stamp: u64,
}

/// A position inside a [`Map`](../map/struct.Map.html): either an entry or the end position just
/// past the maximum key.
///
/// Cursors do not borrow the map they were obtained from. They are moved and dereferenced through
/// the map ([`Map::advance`](../map/struct.Map.html#method.advance),
/// [`Map::retreat`](../map/struct.Map.html#method.retreat),
/// [`Map::get_at`](../map/struct.Map.html#method.get_at)), which checks that the entry is still
/// present. A cursor to an erased entry is reported as
/// [`Error::InvalidCursor`](../enum.Error.html#variant.InvalidCursor) rather than read.
///
/// Two cursors are equal if they refer to the same entry or are both at the end position.
///
/// # Examples
///
/// ```
/// let mut map = rbtree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
///
/// let first = map.begin();
/// assert_eq!(map.get_at(first), Ok((&1, &"a")));
///
/// let second = map.advance(first).unwrap();
/// assert_eq!(map.get_at(second), Ok((&2, &"b")));
///
/// assert_eq!(map.advance(second), Ok(map.end()));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    handle: Option<Handle>,
}

impl Cursor {
    pub(crate) fn end() -> Self { Cursor { handle: None } }

    pub(crate) fn at(index: usize, stamp: u64) -> Self {
        Cursor { handle: Some(Handle { index, stamp }) }
    }

    pub(crate) fn handle(&self) -> Option<Handle> { self.handle }

    /// Checks if the cursor is at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert!(map.begin().is_end());
    ///
    /// map.insert(1, "a");
    /// assert!(!map.begin().is_end());
    /// assert!(map.end().is_end());
    /// ```
    pub fn is_end(&self) -> bool { self.handle.is_none() }
}
