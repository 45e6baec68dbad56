//! An ordered map based on a red-black tree.
//!
//! [`Map`](map/struct.Map.html) keeps its entries sorted by key and supports O(log n) search,
//! insertion and removal. Besides the usual iterators it hands out
//! [`Cursor`](struct.Cursor.html)s, copyable positions that can be moved in either direction and
//! used to erase single entries or whole ranges.
//!
//! # Examples
//!
//! ```
//! let mut map = rbtree::Map::new();
//!
//! for key in [5, 1, 4, 2, 3] {
//!     map.insert(key, key * 10);
//! }
//!
//! let start = map.search(&2);
//! let end = map.search(&4);
//! map.erase_range(start, end).unwrap();
//!
//! assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, 10), (4, 40), (5, 50)]);
//! ```

mod balance;
mod cursor;
mod error;
mod node;

pub mod map;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use map::Map;

#[cfg(any(test, feature = "invariants"))]
pub use balance::Violation;
