mod iter;


use compare::Compare;
use slab::Slab;
use std::cmp::Ordering::*;
use super::cursor::Cursor;
use super::error::{Error, Result};

pub use self::iter::{IntoIter, Iter, IterMut};

/// The slab index of a node, or `None` for the black leaf sentinel.
pub type Link = Option<usize>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone)]
pub struct Node<K, V> {
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) color: Color,
    pub(crate) stamp: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, stamp: u64) -> Self {
        Node {
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            stamp,
            key,
            value,
        }
    }
}

/// A red-black tree whose nodes live in a slab and refer to each other by index.
///
/// The tree owns every node; parent links are plain indices used for upward walks only. Nothing
/// here consults a comparator except the descents in `find` and `insert`.
#[derive(Clone)]
pub struct Tree<K, V> {
    pub(crate) nodes: Slab<Node<K, V>>,
    pub(crate) root: Link,
    next_stamp: u64,
}

impl<K, V> Tree<K, V> {
    pub fn new() -> Self { Tree { nodes: Slab::new(), root: None, next_stamp: 0 } }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.root.is_none() }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn key_value(&self, id: usize) -> (&K, &V) {
        let node = &self.nodes[id];
        (&node.key, &node.value)
    }

    pub fn key_value_mut(&mut self, id: usize) -> (&K, &mut V) {
        let node = &mut self.nodes[id];
        (&node.key, &mut node.value)
    }

    pub fn child<D: Dir>(&self, id: usize) -> Link { D::forward(&self.nodes[id]) }

    pub fn set_child<D: Dir>(&mut self, id: usize, child: Link) {
        *D::forward_mut(&mut self.nodes[id]) = child;
    }

    pub fn parent(&self, id: usize) -> Link { self.nodes[id].parent }

    pub fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |id| self.nodes[id].color)
    }

    pub fn is_red(&self, link: Link) -> bool { self.color(link) == Color::Red }

    pub fn is_black(&self, link: Link) -> bool { self.color(link) == Color::Black }

    pub fn paint(&mut self, id: usize, color: Color) { self.nodes[id].color = color; }

    /// Points whatever referred to `old` (its parent's child slot, or the root) at `new`.
    ///
    /// `new`'s own parent link is left to the caller.
    pub fn replace_child(&mut self, parent: Link, old: usize, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) if self.nodes[parent].left == Some(old) => self.nodes[parent].left = new,
            Some(parent) => self.nodes[parent].right = new,
        }
    }

    /// Returns the node furthest in direction `D` within the subtree rooted at `id`.
    pub fn extremum<D: Dir>(&self, mut id: usize) -> usize {
        while let Some(child) = self.child::<D>(id) { id = child; }
        id
    }

    pub fn first(&self) -> Link { self.root.map(|root| self.extremum::<Left>(root)) }

    pub fn last(&self) -> Link { self.root.map(|root| self.extremum::<Right>(root)) }

    /// Returns the in-order neighbor of `id` in direction `D`: the successor for `Right`, the
    /// predecessor for `Left`.
    pub fn step<D: Dir>(&self, id: usize) -> Link {
        if let Some(child) = self.child::<D>(id) {
            return Some(self.extremum::<D::Opposite>(child));
        }

        let mut id = id;
        while let Some(parent) = self.parent(id) {
            if self.child::<D>(parent) != Some(id) { return Some(parent); }
            id = parent;
        }

        None
    }

    /// Returns the slab indices of all nodes in ascending order.
    pub fn in_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut link = self.first();
        while let Some(id) = link {
            order.push(id);
            link = self.step::<Right>(id);
        }
        order
    }

    pub fn cursor(&self, link: Link) -> Cursor {
        match link {
            None => Cursor::end(),
            Some(id) => Cursor::at(id, self.nodes[id].stamp),
        }
    }

    /// Maps a cursor back to the node it refers to, or `None` for the end position.
    pub fn resolve(&self, cursor: Cursor) -> Result<Link> {
        match cursor.handle() {
            None => Ok(None),
            Some(handle) => match self.nodes.get(handle.index) {
                Some(node) if node.stamp == handle.stamp => Ok(Some(handle.index)),
                _ => Err(Error::InvalidCursor),
            },
        }
    }

    pub fn find<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Link where C: Compare<Q, K> {
        let mut link = self.root;

        while let Some(id) = link {
            let node = &self.nodes[id];
            link = match cmp.compare(key, &node.key) {
                Equal => return link,
                Less => node.left,
                Greater => node.right,
            };
        }

        None
    }

    /// Attaches a new red node below the leaf found by a standard descent and rebalances.
    ///
    /// Keys equal to an existing key descend to the right, so duplicates are kept as separate
    /// nodes in insertion order.
    pub fn insert<C>(&mut self, cmp: &C, key: K, value: V) -> usize where C: Compare<K> {
        let mut parent = None;
        let mut link = self.root;
        let mut left = false;

        while let Some(id) = link {
            let node = &self.nodes[id];
            left = cmp.compares_lt(&key, &node.key);
            parent = link;
            link = if left { node.left } else { node.right };
        }

        let stamp = self.next_stamp;
        self.next_stamp += 1;

        let mut node = Node::new(key, value, stamp);
        node.parent = parent;
        let id = self.nodes.insert(node);

        match parent {
            None => self.root = Some(id),
            Some(parent) if left => self.nodes[parent].left = Some(id),
            Some(parent) => self.nodes[parent].right = Some(id),
        }

        self.insert_fixup(id);
        id
    }

    /// Removes the entry stored at `id`, returning it and its in-order successor.
    ///
    /// When `id` has two children it first trades places with its successor, so that the node
    /// unlinked has at most one child. Entries stay in their slots, so cursors to every other
    /// entry keep resolving.
    pub fn remove(&mut self, id: usize) -> (K, V, Link) {
        let next = self.step::<Right>(id);

        if let (Some(_), Some(right)) = (self.nodes[id].left, self.nodes[id].right) {
            let successor = self.extremum::<Left>(right);
            self.swap_positions(id, successor);
        }

        let node = &self.nodes[id];
        let child = node.left.or(node.right);
        let parent = node.parent;
        let color = node.color;

        self.replace_child(parent, id, child);
        if let Some(child) = child { self.nodes[child].parent = parent; }

        if color == Color::Black { self.remove_fixup(child, parent); }

        let node = self.nodes.remove(id);
        (node.key, node.value, next)
    }

    // Exchanges the tree positions and colors of `node` and `successor`, the leftmost node of
    // `node`'s right subtree.
    fn swap_positions(&mut self, node: usize, successor: usize) {
        let Node { parent, left, right, color, .. } = self.nodes[node];
        let succ_parent = self.nodes[successor].parent;
        let succ_right = self.nodes[successor].right;
        let succ_color = self.nodes[successor].color;

        self.replace_child(parent, node, Some(successor));
        if let Some(left) = left { self.nodes[left].parent = Some(successor); }
        if let Some(succ_right) = succ_right { self.nodes[succ_right].parent = Some(node); }

        let (node_parent, succ_right_link) = if succ_parent == Some(node) {
            (Some(successor), Some(node))
        } else {
            if let Some(right) = right { self.nodes[right].parent = Some(successor); }
            if let Some(succ_parent) = succ_parent { self.nodes[succ_parent].left = Some(node); }
            (succ_parent, right)
        };

        let moved = &mut self.nodes[successor];
        moved.parent = parent;
        moved.left = left;
        moved.right = succ_right_link;
        moved.color = color;

        let moved = &mut self.nodes[node];
        moved.parent = node_parent;
        moved.left = None;
        moved.right = succ_right;
        moved.color = succ_color;
    }

    pub fn into_ordered(self) -> IntoIter<K, V> {
        let order = self.in_order();
        IntoIter::new(self.nodes, order)
    }
}

/// A side of a node, so that mirror-image procedures are written once.
pub trait Dir: Sized {
    type Opposite: Dir<Opposite=Self>;

    fn forward<K, V>(node: &Node<K, V>) -> Link;
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link;
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn forward<K, V>(node: &Node<K, V>) -> Link { node.left }
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn forward<K, V>(node: &Node<K, V>) -> Link { node.right }
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.right }
}
